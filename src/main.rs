mod cli;
mod config;
mod error;
mod evidence;
mod links;
mod portfolio;
mod recruiter;
mod report;
mod scoring;
mod telemetry;
mod types;

use crate::error::ReelPassError;
use crate::links::LinkStore;
use crate::types::config::ReelPassConfig;
use chrono::Utc;
use clap::Parser;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32, ReelPassError> {
    let cli = cli::Cli::parse();
    let loaded = config::load_config(&cli.config_dir)?;
    let level = telemetry::level_for(
        cli.verbose,
        cli.quiet,
        loaded.as_ref().and_then(ReelPassConfig::log_level),
    );
    telemetry::init(&level)?;
    match &loaded {
        Some(cfg) => {
            for layer in &cfg.layers {
                debug!(path = %layer.display(), "config layer merged");
            }
        }
        None => {
            info!(dir = %cli.config_dir.display(), "no reelpass.toml found, using defaults")
        }
    }
    let cfg = loaded.unwrap_or_default();
    let policy = cfg.scoring_policy();

    match cli.command {
        cli::Commands::Score(cmd) => {
            let raw = evidence::load_bundle(&cmd.bundle)?;
            let score_report = scoring::evaluate_raw(&raw, &policy)?;
            info!(
                bundle = %cmd.bundle.display(),
                total_score = score_report.score.total_score,
                tier = %score_report.score.tier,
                "bundle scored"
            );

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let rendered = report::render(&score_report, output_format)?;
            println!("{rendered}");

            if score_report.has_dropped() {
                eprintln!(
                    "warning: {} evidence record(s) dropped",
                    score_report.dropped.len()
                );
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Tier(cmd) => {
            let tier = scoring::tier::classify_checked(cmd.score)?;
            println!("{} {}: {}", cmd.score, tier.tier, tier.description);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Batch(cmd) => {
            if !cmd.dir.is_dir() {
                return Err(ReelPassError::PathNotFound(cmd.dir.display().to_string()));
            }
            Ok(run_batch(&cmd.dir, &policy))
        }
        cli::Commands::Link(cmd) => run_link(cmd, &cfg),
        cli::Commands::Stats(cmd) => {
            let portfolio = portfolio::load_portfolio(&cmd.portfolio)?;
            let store = links::file::load(&cmd.store.store)?;
            let stats = portfolio::stats(&portfolio, &store.links_for(&portfolio.professional_id));
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Recruiters(cmd) => {
            let ratings = recruiter::load_ratings(&cmd.ratings)?;
            let sort = match cmd.sort {
                cli::SortBy::Rating => recruiter::SortKey::Rating,
                cli::SortBy::Reviews => recruiter::SortKey::Reviews,
                cli::SortBy::Recent => recruiter::SortKey::Recent,
            };
            let board = recruiter::scoreboard(&ratings, &cmd.search, sort);
            if board.is_empty() {
                println!("recruiters: no matches");
                return Ok(exit_code::SUCCESS);
            }
            for rating in &board {
                println!(
                    "- {} <{}>: {:.1} ({}), {} reviews, {} positive / {} negative",
                    rating.name,
                    rating.email,
                    rating.overall_rating,
                    rating.level(),
                    rating.total_reviews,
                    rating.positive_reviews,
                    rating.negative_reviews
                );
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn run_batch(dir: &Path, policy: &scoring::policy::ScoringPolicy) -> i32 {
    let bundles = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"));

    let mut scored = 0usize;
    let mut degraded = false;
    for entry in bundles {
        let path = entry.path();
        let outcome = evidence::load_bundle(path)
            .and_then(|raw| evidence::normalize(&raw, policy));
        match outcome {
            Ok(normalized) => {
                scored += 1;
                let score = scoring::score(&normalized.bundle, policy);
                if normalized.dropped.is_empty() {
                    println!("{}: {} {}", path.display(), score.total_score, score.tier);
                } else {
                    degraded = true;
                    println!(
                        "{}: {} {} ({} dropped)",
                        path.display(),
                        score.total_score,
                        score.tier,
                        normalized.dropped.len()
                    );
                }
            }
            Err(err) => {
                degraded = true;
                warn!(path = %path.display(), error = %err, "bundle failed to score");
                println!("{}: error: {}", path.display(), err);
            }
        }
    }

    info!(dir = %dir.display(), scored, "batch complete");
    if scored == 0 {
        println!("batch: no bundles found");
    }
    if degraded {
        exit_code::WARNINGS
    } else {
        exit_code::SUCCESS
    }
}

fn run_link(cmd: cli::LinkCommand, cfg: &ReelPassConfig) -> Result<i32, ReelPassError> {
    let now = Utc::now();
    match cmd {
        cli::LinkCommand::Create(issue) => issue_link(issue, cfg, false),
        cli::LinkCommand::Replace(issue) => issue_link(issue, cfg, true),
        cli::LinkCommand::Revoke(target) => {
            let revoked = links::file::update(&target.store.store, |store| {
                store.revoke(&target.slug)?;
                store.get(&target.slug)
            })?;
            println!("revoked {} for {}", revoked.slug, revoked.professional_id);
            Ok(exit_code::SUCCESS)
        }
        cli::LinkCommand::View(target) => {
            let count = links::file::update(&target.store.store, |store| {
                store.increment_view(&target.slug, now)
            })?;
            println!("{} views: {}", target.slug, count);
            Ok(exit_code::SUCCESS)
        }
        cli::LinkCommand::Show(show) => {
            let store = links::file::load(&show.store.store)?;
            let all = store.links_for(&show.professional_id);
            if all.is_empty() {
                println!("link: no links for {}", show.professional_id);
                return Ok(exit_code::SUCCESS);
            }
            let active = store
                .active_for(&show.professional_id, now)
                .map(|link| link.slug);
            for link in &all {
                let state = if active.as_deref() == Some(link.slug.as_str()) {
                    "active"
                } else if link.revoked {
                    "revoked"
                } else {
                    "expired"
                };
                println!(
                    "- {} [{}] {} views, {}",
                    link.url(cfg.base_url()),
                    state,
                    link.view_count,
                    describe_expiry(link)
                );
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn issue_link(
    issue: cli::LinkIssueCommand,
    cfg: &ReelPassConfig,
    replace: bool,
) -> Result<i32, ReelPassError> {
    let policy = match &issue.expires {
        Some(value) => value.parse()?,
        None => cfg.default_expiration()?,
    };
    let now = Utc::now();
    let link = links::file::update(&issue.store.store, |store| {
        if replace {
            store.replace(&issue.professional_id, policy, now)
        } else {
            store.create(&issue.professional_id, policy, now)
        }
    })?;
    println!("{} {}", link.slug, link.url(cfg.base_url()));
    println!("{}", describe_expiry(&link));
    Ok(exit_code::SUCCESS)
}

fn describe_expiry(link: &links::PublicLink) -> String {
    match link.expires_at {
        Some(at) => format!("expires {}", at.to_rfc3339()),
        None => "never expires".to_string(),
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            if let Some(category) = e.category() {
                eprintln!(
                    "hint: check the \"{}\" container of the evidence bundle",
                    category.bundle_key()
                );
            }
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
