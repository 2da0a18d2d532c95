pub mod file;
pub mod memory;
pub mod slug;

pub use memory::InMemoryLinkStore;

use crate::error::{ReelPassError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpirationPolicy {
    #[serde(rename = "90")]
    Days90,
    #[serde(rename = "180")]
    Days180,
    #[serde(rename = "365")]
    Days365,
    #[serde(rename = "never")]
    Never,
}

impl ExpirationPolicy {
    pub fn days(self) -> Option<i64> {
        match self {
            ExpirationPolicy::Days90 => Some(90),
            ExpirationPolicy::Days180 => Some(180),
            ExpirationPolicy::Days365 => Some(365),
            ExpirationPolicy::Never => None,
        }
    }

    pub fn expires_at(self, created_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.days().map(|days| created_at + Duration::days(days))
    }
}

impl FromStr for ExpirationPolicy {
    type Err = ReelPassError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "90" | "90d" | "3-months" => Ok(ExpirationPolicy::Days90),
            "180" | "180d" | "6-months" => Ok(ExpirationPolicy::Days180),
            "365" | "365d" | "1-year" => Ok(ExpirationPolicy::Days365),
            "never" => Ok(ExpirationPolicy::Never),
            _ => Err(ReelPassError::InvalidExpiration(value.to_string())),
        }
    }
}

impl fmt::Display for ExpirationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.days() {
            Some(days) => write!(f, "{days} days"),
            None => f.write_str("never"),
        }
    }
}

/// Revocable, optionally time-limited public profile link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicLink {
    pub slug: String,
    pub professional_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub revoked: bool,
    #[serde(default)]
    pub view_count: u64,
}

impl PublicLink {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .map(|expires_at| now >= expires_at)
            .unwrap_or(false)
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && !self.is_expired(now)
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.slug)
    }
}

/// Storage contract for public links. At most one active link exists per
/// professional; view increments are atomic.
pub trait LinkStore: Send + Sync {
    fn create(
        &self,
        professional_id: &str,
        policy: ExpirationPolicy,
        now: DateTime<Utc>,
    ) -> Result<PublicLink>;

    /// Revokes any active link for the professional and issues a new one.
    fn replace(
        &self,
        professional_id: &str,
        policy: ExpirationPolicy,
        now: DateTime<Utc>,
    ) -> Result<PublicLink>;

    fn revoke(&self, slug: &str) -> Result<()>;

    /// Records one page view and returns the new count.
    fn increment_view(&self, slug: &str, now: DateTime<Utc>) -> Result<u64>;

    fn get(&self, slug: &str) -> Result<PublicLink>;

    fn active_for(&self, professional_id: &str, now: DateTime<Utc>) -> Option<PublicLink>;

    fn links_for(&self, professional_id: &str) -> Vec<PublicLink>;
}
