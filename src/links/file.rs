use super::{InMemoryLinkStore, PublicLink};
use crate::error::{ReelPassError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tracing::debug;

pub const DEFAULT_STORE_FILE: &str = ".reelpass/links.json";

const LOCK_TIMEOUT: Duration = Duration::from_secs(10);
const LOCK_RETRY: Duration = Duration::from_millis(5);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSnapshot {
    pub version: String,
    pub saved_at: String,
    #[serde(default)]
    pub links: Vec<PublicLink>,
}

/// Exclusive hold on a store file, shared across processes through a
/// sibling `<store>.lock` file. The lock file is removed on drop.
#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
    _file: File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn lock_path(store: &Path) -> PathBuf {
    let mut name = store
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    store.with_file_name(name)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Waits for exclusive access to the store at `path`.
pub fn lock(path: &Path) -> Result<StoreLock> {
    ensure_parent(path)?;
    let lock_path = lock_path(path);
    let deadline = Instant::now() + LOCK_TIMEOUT;
    loop {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(file) => {
                return Ok(StoreLock {
                    path: lock_path,
                    _file: file,
                })
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                if Instant::now() >= deadline {
                    return Err(ReelPassError::StoreLocked(lock_path.display().to_string()));
                }
                thread::sleep(LOCK_RETRY);
            }
            Err(err) => return Err(ReelPassError::Io(err)),
        }
    }
}

/// Loads a store from a snapshot file. A missing file is an empty store.
pub fn load(path: &Path) -> Result<InMemoryLinkStore> {
    if !path.exists() {
        return Ok(InMemoryLinkStore::new());
    }
    let content = fs::read_to_string(path)?;
    let snapshot: LinkSnapshot = serde_json::from_str(&content)?;
    Ok(InMemoryLinkStore::from_links(snapshot.links))
}

/// Writes the snapshot to a temp file beside `path` and renames it into
/// place, so readers see either the old or the new store.
pub fn save(path: &Path, store: &InMemoryLinkStore) -> Result<()> {
    ensure_parent(path)?;
    let snapshot = LinkSnapshot {
        version: env!("CARGO_PKG_VERSION").to_string(),
        saved_at: Utc::now().to_rfc3339(),
        links: store.snapshot(),
    };
    let json = serde_json::to_string_pretty(&snapshot)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(json.as_bytes())?;
    staged.flush()?;
    staged.persist(path).map_err(|err| ReelPassError::Io(err.error))?;
    Ok(())
}

/// Runs `change` against the store at `path` under the store lock and
/// saves the result. Nothing is written when `change` fails.
pub fn update<T, F>(path: &Path, change: F) -> Result<T>
where
    F: FnOnce(&InMemoryLinkStore) -> Result<T>,
{
    let _lock = lock(path)?;
    let store = load(path)?;
    let outcome = change(&store)?;
    save(path, &store)?;
    debug!(path = %path.display(), "link store updated");
    Ok(outcome)
}
