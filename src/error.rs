use crate::types::scoring::Category;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReelPassError {
    #[error("malformed {category} record at index {index}: {reason}")]
    MalformedRecord {
        category: Category,
        index: usize,
        reason: String,
    },

    #[error("invalid evidence bundle ({category}): {reason}")]
    InvalidBundleShape { category: Category, reason: String },

    #[error("evidence bundle must be a JSON object, found {0}")]
    BundleNotObject(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("invalid expiration policy: {0} (expected 90, 180, 365 or never)")]
    InvalidExpiration(String),

    #[error("score out of range: {0} (expected 0..=1000)")]
    ScoreOutOfRange(u32),

    #[error("public link not found: {0}")]
    LinkNotFound(String),

    #[error("public link has been revoked: {0}")]
    LinkRevoked(String),

    #[error("public link has expired: {0}")]
    LinkExpired(String),

    #[error("professional {professional_id} already has an active link: {slug}")]
    ActiveLinkExists {
        professional_id: String,
        slug: String,
    },

    #[error("link store is locked by another process: {0} (remove it if no reelpass command is running)")]
    StoreLocked(String),

    #[error("telemetry error: {0}")]
    Telemetry(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReelPassError {
    /// Evidence category the error is attributable to, if any.
    pub fn category(&self) -> Option<Category> {
        match self {
            ReelPassError::MalformedRecord { category, .. }
            | ReelPassError::InvalidBundleShape { category, .. } => Some(*category),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReelPassError>;
