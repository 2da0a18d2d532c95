use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

pub const SLUG_LEN: usize = 12;

static SLUG_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub fn mint(professional_id: &str, created_at: DateTime<Utc>) -> String {
    let sequence = SLUG_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let stamp = created_at.timestamp_nanos_opt().unwrap_or_default();
    let seed = format!("{professional_id}:{stamp}:{sequence}");
    let digest = sha256_hex(seed.as_bytes());
    digest[..SLUG_LEN].to_string()
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}
