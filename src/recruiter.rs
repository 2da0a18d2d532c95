use crate::error::{ReelPassError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingLevel {
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl fmt::Display for RatingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RatingLevel::Poor => "Poor",
            RatingLevel::Fair => "Fair",
            RatingLevel::Good => "Good",
            RatingLevel::VeryGood => "Very Good",
            RatingLevel::Excellent => "Excellent",
        };
        f.write_str(text)
    }
}

/// Sorted by descending floor.
const RATING_LEVELS: [(f64, RatingLevel); 4] = [
    (4.5, RatingLevel::Excellent),
    (4.0, RatingLevel::VeryGood),
    (3.5, RatingLevel::Good),
    (3.0, RatingLevel::Fair),
];

pub fn rating_level(overall_rating: f64) -> RatingLevel {
    RATING_LEVELS
        .iter()
        .find(|(floor, _)| overall_rating >= *floor)
        .map(|(_, level)| *level)
        .unwrap_or(RatingLevel::Poor)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterFeedback {
    pub job_title: String,
    pub rating: f64,
    #[serde(default)]
    pub feedback: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterRating {
    pub id: String,
    pub name: String,
    pub email: String,
    pub total_reviews: u32,
    pub avg_communication: f64,
    pub avg_professionalism: f64,
    pub avg_role_accuracy: f64,
    pub overall_rating: f64,
    pub positive_reviews: u32,
    pub negative_reviews: u32,
    /// Newest first.
    #[serde(default)]
    pub recent_feedback: Vec<RecruiterFeedback>,
}

impl RecruiterRating {
    pub fn level(&self) -> RatingLevel {
        rating_level(self.overall_rating)
    }

    fn latest_feedback(&self) -> Option<DateTime<Utc>> {
        self.recent_feedback.first().map(|feedback| feedback.date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Rating,
    Reviews,
    Recent,
}

pub fn load_ratings(path: &Path) -> Result<Vec<RecruiterRating>> {
    if !path.exists() {
        return Err(ReelPassError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Keeps recruiters whose name or email contains `query`, ignoring case,
/// then orders them descending by `sort`. Ties keep their input order.
pub fn scoreboard(
    ratings: &[RecruiterRating],
    query: &str,
    sort: SortKey,
) -> Vec<RecruiterRating> {
    let needle = query.trim().to_lowercase();
    let mut matched = ratings
        .iter()
        .filter(|rating| {
            needle.is_empty()
                || rating.name.to_lowercase().contains(&needle)
                || rating.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect::<Vec<_>>();

    matched.sort_by(|a, b| match sort {
        SortKey::Rating => b
            .overall_rating
            .partial_cmp(&a.overall_rating)
            .unwrap_or(Ordering::Equal),
        SortKey::Reviews => b.total_reviews.cmp(&a.total_reviews),
        SortKey::Recent => b.latest_feedback().cmp(&a.latest_feedback()),
    });
    matched
}
