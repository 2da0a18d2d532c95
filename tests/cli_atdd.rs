#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn sample_bundle() -> Value {
    let content =
        fs::read_to_string(fixture("sample_bundle.json")).expect("fixture should be readable");
    serde_json::from_str(&content).expect("fixture should be valid json")
}

fn reelpass_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("reelpass").expect("binary should compile");
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn write_json(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent dir should be created");
    }
    fs::write(path, serde_json::to_string_pretty(value).expect("json should serialize"))
        .expect("json should write");
}

#[test]
fn score_json_outputs_composite_contract() {
    let dir = TempDir::new().expect("temp dir should be created");
    let output = reelpass_in(dir.path())
        .arg("score")
        .arg(fixture("sample_bundle.json"))
        .output()
        .expect("command should run");
    assert_eq!(output.status.code(), Some(0));

    let rendered: Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid json");
    assert_eq!(rendered["totalScore"], json!(563));
    assert_eq!(rendered["tier"], json!("competent"));
    assert_eq!(
        rendered["breakdown"],
        json!({
            "project": 260,
            "persona": 150,
            "foundational": 65,
            "experience": 70,
            "learning": 18
        })
    );
    assert!(rendered.get("dropped").is_none());
}

#[test]
fn score_markdown_lists_breakdown() {
    let dir = TempDir::new().expect("temp dir should be created");
    reelpass_in(dir.path())
        .arg("score")
        .arg(fixture("sample_bundle.json"))
        .args(["--format", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# ReelPass Score"))
        .stdout(predicate::str::contains("| Project evidence | 260 | 500 | 50% |"))
        .stdout(predicate::str::contains("Tier: Competent Professional (green)"));
}

#[test]
fn score_is_byte_identical_across_runs() {
    let dir = TempDir::new().expect("temp dir should be created");
    let run = || {
        reelpass_in(dir.path())
            .arg("score")
            .arg(fixture("sample_bundle.json"))
            .output()
            .expect("command should run")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn score_returns_warning_when_records_are_dropped() {
    let dir = TempDir::new().expect("temp dir should be created");
    let mut bundle = sample_bundle();
    bundle["projects"][0]["vettingScore"] = json!(140);
    let path = dir.path().join("bundle.json");
    write_json(&path, &bundle);

    let output = reelpass_in(dir.path())
        .arg("score")
        .arg(&path)
        .output()
        .expect("command should run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 evidence record(s) dropped"));

    let rendered: Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid json");
    assert_eq!(rendered["breakdown"]["project"], json!(165));
    assert_eq!(rendered["dropped"][0]["category"], json!("project"));
    assert_eq!(rendered["dropped"][0]["index"], json!(0));
}

#[test]
fn score_rejects_missing_category_container() {
    let dir = TempDir::new().expect("temp dir should be created");
    let mut bundle = sample_bundle();
    bundle
        .as_object_mut()
        .expect("bundle should be an object")
        .remove("learning");
    let path = dir.path().join("bundle.json");
    write_json(&path, &bundle);

    reelpass_in(dir.path())
        .arg("score")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid evidence bundle (learning)"))
        .stderr(predicate::str::contains(
            "hint: check the \"learning\" container",
        ));
}

#[test]
fn debug_logging_lists_merged_config_layers() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(dir.path().join("reelpass.toml"), "[logging]\nlevel = \"warn\"\n")
        .expect("config should write");

    reelpass_in(dir.path())
        .args(["-vv", "tier", "450"])
        .assert()
        .success()
        .stderr(predicate::str::contains("config layer merged"))
        .stderr(predicate::str::contains("reelpass.toml"));
}

#[test]
fn config_allows_missing_categories_and_requires_verified_credentials() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(
        dir.path().join("reelpass.toml"),
        r#"
[scoring]
allow_missing_categories = true
require_verified_credentials = true
"#,
    )
    .expect("config should write");

    let mut bundle = sample_bundle();
    let object = bundle.as_object_mut().expect("bundle should be an object");
    object.remove("learning");
    bundle["credentials"][2]["verificationStatus"] = json!("pending");
    let path = dir.path().join("bundle.json");
    write_json(&path, &bundle);

    let output = reelpass_in(dir.path())
        .arg("score")
        .arg(&path)
        .output()
        .expect("command should run");
    assert_eq!(output.status.code(), Some(0));
    let rendered: Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid json");
    assert_eq!(rendered["breakdown"]["learning"], json!(0));
    assert_eq!(rendered["breakdown"]["foundational"], json!(50));
}

#[test]
fn invalid_config_is_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(
        dir.path().join("reelpass.toml"),
        "[links]\ndefault_expiration = \"fortnight\"\n",
    )
    .expect("config should write");

    reelpass_in(dir.path())
        .args(["tier", "10"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("links.default_expiration"));
}

#[test]
fn batch_scores_every_bundle_in_directory() {
    let dir = TempDir::new().expect("temp dir should be created");
    let bundles = dir.path().join("bundles");
    write_json(&bundles.join("a.json"), &sample_bundle());
    write_json(
        &bundles.join("nested/b.json"),
        &json!({
            "projects": [], "persona": [], "credentials": [],
            "learning": [], "experience": []
        }),
    );
    fs::write(bundles.join("notes.txt"), "ignored").expect("notes should write");

    reelpass_in(dir.path())
        .arg("batch")
        .arg(&bundles)
        .assert()
        .success()
        .stdout(predicate::str::contains("a.json: 563 competent"))
        .stdout(predicate::str::contains("b.json: 0 aspiring"))
        .stdout(predicate::str::contains("notes.txt").not());
}

#[test]
fn batch_reports_broken_bundles_as_warnings() {
    let dir = TempDir::new().expect("temp dir should be created");
    let bundles = dir.path().join("bundles");
    write_json(&bundles.join("good.json"), &sample_bundle());
    write_json(&bundles.join("bad.json"), &json!(["not", "an", "object"]));

    reelpass_in(dir.path())
        .arg("batch")
        .arg(&bundles)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("bad.json: error:"))
        .stdout(predicate::str::contains("good.json: 563 competent"));
}

#[test]
fn link_lifecycle_round_trips_through_store_file() {
    let dir = TempDir::new().expect("temp dir should be created");
    let store = dir.path().join("links.json");

    let output = reelpass_in(dir.path())
        .args(["link", "create", "pro-1", "--expires", "never", "--store"])
        .arg(&store)
        .output()
        .expect("command should run");
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("never expires"));
    let slug = stdout
        .split_whitespace()
        .next()
        .expect("slug should be printed")
        .to_string();
    assert_eq!(slug.len(), 12);

    reelpass_in(dir.path())
        .args(["link", "create", "pro-1", "--store"])
        .arg(&store)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("already has an active link"));

    for expected in ["views: 1", "views: 2"] {
        reelpass_in(dir.path())
            .args(["link", "view", &slug, "--store"])
            .arg(&store)
            .assert()
            .success()
            .stdout(predicate::str::contains(expected));
    }

    reelpass_in(dir.path())
        .args(["link", "revoke", &slug, "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("revoked {slug} for pro-1")));

    reelpass_in(dir.path())
        .args(["link", "view", &slug, "--store"])
        .arg(&store)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("revoked"));

    reelpass_in(dir.path())
        .args(["link", "show", "pro-1", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "http://localhost:5174/public/{slug} [revoked] 2 views"
        )));
}

#[test]
fn concurrent_link_views_are_all_recorded() {
    let dir = TempDir::new().expect("temp dir should be created");
    let store = dir.path().join("links.json");
    let output = reelpass_in(dir.path())
        .args(["link", "create", "pro-1", "--expires", "never", "--store"])
        .arg(&store)
        .output()
        .expect("command should run");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let slug = stdout
        .split_whitespace()
        .next()
        .expect("slug should be printed")
        .to_string();

    let viewers = (0..4)
        .map(|_| {
            let root = dir.path().to_path_buf();
            let store = store.clone();
            let slug = slug.clone();
            std::thread::spawn(move || {
                for _ in 0..10 {
                    reelpass_in(&root)
                        .args(["link", "view", &slug, "--store"])
                        .arg(&store)
                        .assert()
                        .success();
                }
            })
        })
        .collect::<Vec<_>>();
    for viewer in viewers {
        viewer.join().expect("viewer thread should finish");
    }

    reelpass_in(dir.path())
        .args(["link", "show", "pro-1", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("[active] 40 views"));
    assert!(!dir.path().join("links.json.lock").exists());
}

#[test]
fn link_replace_revokes_previous_link() {
    let dir = TempDir::new().expect("temp dir should be created");
    let store = dir.path().join(".reelpass/links.json");

    reelpass_in(dir.path())
        .args(["link", "create", "pro-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("expires"));
    reelpass_in(dir.path())
        .args(["link", "replace", "pro-1", "--expires", "1-year"])
        .assert()
        .success();
    assert!(store.exists(), "default store file should be written");

    reelpass_in(dir.path())
        .args(["link", "show", "pro-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[revoked]").count(1))
        .stdout(predicate::str::contains("[active]").count(1));
}

#[test]
fn stats_combine_portfolio_and_link_views() {
    let dir = TempDir::new().expect("temp dir should be created");
    let store = dir.path().join("links.json");
    let output = reelpass_in(dir.path())
        .args(["link", "create", "pro-1", "--store"])
        .arg(&store)
        .output()
        .expect("command should run");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let slug = stdout
        .split_whitespace()
        .next()
        .expect("slug should be printed")
        .to_string();
    reelpass_in(dir.path())
        .args(["link", "view", &slug, "--store"])
        .arg(&store)
        .assert()
        .success();

    let portfolio = dir.path().join("portfolio.json");
    write_json(
        &portfolio,
        &json!({
            "professionalId": "pro-1",
            "profile": {
                "firstName": "Thandi",
                "lastName": "Nkosi",
                "title": "Senior Engineer",
                "email": "thandi@example.com"
            },
            "skills": [
                { "name": "Rust", "verified": true, "endorsements": 10 },
                { "name": "SQL" }
            ],
            "projects": [
                { "title": "Payments API" },
                { "title": "Prototype", "status": "in_progress" }
            ]
        }),
    );

    let output = reelpass_in(dir.path())
        .arg("stats")
        .arg(&portfolio)
        .arg("--store")
        .arg(&store)
        .output()
        .expect("command should run");
    assert_eq!(output.status.code(), Some(0));
    let stats: Value = serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(stats["totalViews"], json!(1));
    assert_eq!(stats["linkShares"], json!(1));
    assert_eq!(stats["completedProjects"], json!(1));
    assert_eq!(stats["profileCompleteness"], json!(60));
    // 4 + 5 + 0.1 + 2 + 2
    assert_eq!(stats["portfolioScore"], json!(13));
}

#[test]
fn recruiters_sorted_and_filtered() {
    let dir = TempDir::new().expect("temp dir should be created");
    let ratings = dir.path().join("ratings.json");
    let recruiter = |id: &str, name: &str, rating: f64, reviews: u32| {
        json!({
            "id": id,
            "name": name,
            "email": format!("{id}@talent.example"),
            "totalReviews": reviews,
            "avgCommunication": rating,
            "avgProfessionalism": rating,
            "avgRoleAccuracy": rating,
            "overallRating": rating,
            "positiveReviews": reviews,
            "negativeReviews": 0
        })
    };
    write_json(
        &ratings,
        &json!([
            recruiter("sam", "Sam Patel", 3.2, 80),
            recruiter("fiona", "Fiona Dlamini", 4.6, 156),
        ]),
    );

    let output = reelpass_in(dir.path())
        .arg("recruiters")
        .arg(&ratings)
        .output()
        .expect("command should run");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let fiona = stdout.find("Fiona").expect("fiona should be listed");
    let sam = stdout.find("Sam").expect("sam should be listed");
    assert!(fiona < sam);
    assert!(stdout.contains("4.6 (Excellent)"));
    assert!(stdout.contains("3.2 (Fair)"));

    reelpass_in(dir.path())
        .arg("recruiters")
        .arg(&ratings)
        .args(["--search", "PATEL"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sam Patel"))
        .stdout(predicate::str::contains("Fiona").not());
}
