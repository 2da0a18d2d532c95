use crate::error::{ReelPassError, Result};
use crate::types::config::ReelPassConfig;
use std::path::{Path, PathBuf};
use toml::map::{Entry, Map};
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "reelpass.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".reelpass/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/reelpass/config.toml";

/// Loads the layered configuration rooted at `root`. Returns `None` when the
/// directory has no `reelpass.toml`.
pub fn load_config(root: &Path) -> Result<Option<ReelPassConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<ReelPassConfig>> {
    let repo_path = root.join(DEFAULT_CONFIG_FILE);
    if !repo_path.exists() {
        return Ok(None);
    }

    let candidates = [
        global_path.map(Path::to_path_buf),
        Some(repo_path),
        Some(root.join(DEFAULT_LOCAL_FILE)),
    ];
    let mut merged = Value::Table(Map::new());
    let mut layers = Vec::new();
    for path in candidates.into_iter().flatten() {
        if path.exists() {
            overlay(&mut merged, read_layer(&path)?);
            layers.push(path);
        }
    }

    let mut cfg: ReelPassConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| ReelPassError::ConfigParse(e.to_string()))?;
    cfg.validate().map_err(|err| match err {
        ReelPassError::ConfigParse(reason) => {
            ReelPassError::ConfigParse(format!("{reason} (merged from {})", describe(&layers)))
        }
        other => other,
    })?;
    cfg.layers = layers;
    Ok(Some(cfg))
}

fn describe(layers: &[PathBuf]) -> String {
    layers
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn read_layer(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ReelPassError::ConfigParse(format!("{}: {}", path.display(), e)))
}

/// Deep-merges `layer` into `base`. Tables merge key by key; any other
/// value in `layer` replaces the one below it.
fn overlay(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Table(base_table), Value::Table(layer_table)) => {
            for (key, value) in layer_table {
                match base_table.entry(key) {
                    Entry::Occupied(mut slot) => overlay(slot.get_mut(), value),
                    Entry::Vacant(slot) => {
                        slot.insert(value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::ExpirationPolicy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_returns_none_when_repo_file_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert!(cfg.is_none());
    }

    #[test]
    fn load_config_merges_global_repo_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[links]
base_url = "https://global.example/public"
default_expiration = "never"

[logging]
level = "warn"
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[scoring]
require_verified_credentials = true

[links]
default_expiration = "180"
"#,
        )
        .expect("repo config should write");

        fs::create_dir_all(root.path().join(".reelpass")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[logging]
level = "debug"
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed")
            .expect("merged config should exist");

        assert!(cfg.scoring_policy().require_verified_credentials);
        assert_eq!(
            cfg.default_expiration().expect("expiration should parse"),
            ExpirationPolicy::Days180
        );
        assert_eq!(cfg.base_url(), "https://global.example/public");
        assert_eq!(cfg.log_level(), Some("debug"));
    }

    #[test]
    fn load_config_records_merged_layers_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[logging]\nlevel = \"info\"\n")
            .expect("repo config should write");
        fs::create_dir_all(root.path().join(".reelpass")).expect("local dir should create");
        fs::write(root.path().join(DEFAULT_LOCAL_FILE), "[logging]\nlevel = \"debug\"\n")
            .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&root.path().join("absent.toml")))
            .expect("load should succeed")
            .expect("merged config should exist");
        assert_eq!(
            cfg.layers,
            vec![
                root.path().join(DEFAULT_CONFIG_FILE),
                root.path().join(DEFAULT_LOCAL_FILE)
            ]
        );
    }

    #[test]
    fn validation_errors_name_the_merged_layers() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            "[links]\ndefault_expiration = \"fortnight\"\n",
        )
        .expect("repo config should write");

        let err = load_config_with_global(root.path(), None).expect_err("load should fail");
        let message = err.to_string();
        assert!(message.contains("links.default_expiration"));
        assert!(message.contains(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn load_config_rejects_invalid_merged_values() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[scoring.project]
impact = { extreme = 30 }
"#,
        )
        .expect("repo config should write");

        let err = load_config_with_global(root.path(), None).expect_err("load should fail");
        assert!(matches!(err, ReelPassError::ConfigParse(_)));
    }

    #[test]
    fn load_config_reports_syntax_errors_with_path() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[scoring\n").expect("should write");

        let err = load_config_with_global(root.path(), None).expect_err("load should fail");
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }
}
