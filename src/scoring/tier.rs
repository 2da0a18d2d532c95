use crate::error::{ReelPassError, Result};
use crate::types::scoring::{Points, Tier, MAX_TOTAL_SCORE};
use serde::Serialize;

/// Presentation metadata for a tier. The lookup is static so a score always
/// maps to the same text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierInfo {
    pub tier: Tier,
    pub min_score: Points,
    pub label: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

/// Sorted by descending lower bound.
pub const TIER_TABLE: [TierInfo; 5] = [
    TierInfo {
        tier: Tier::Expert,
        min_score: 800,
        label: "Expert Professional",
        description: "Expert Professional - Industry-leading, comprehensively proven skills, and an exceptional work persona.",
        color: "purple",
    },
    TierInfo {
        tier: Tier::Skilled,
        min_score: 600,
        label: "Skilled Professional",
        description: "Skilled Professional - Strong portfolio of vetted skills and a well-defined, effective work persona.",
        color: "blue",
    },
    TierInfo {
        tier: Tier::Competent,
        min_score: 400,
        label: "Competent Professional",
        description: "Competent Professional - Solid base of proven skills and a developing understanding of their work persona.",
        color: "green",
    },
    TierInfo {
        tier: Tier::Emerging,
        min_score: 200,
        label: "Emerging Professional",
        description: "Emerging Professional - Developing demonstrable skills and gaining insights into work persona.",
        color: "yellow",
    },
    TierInfo {
        tier: Tier::Aspiring,
        min_score: 0,
        label: "Aspiring Professional",
        description: "Aspiring Professional - Beginning to build a portfolio of demonstrated skills and understand work persona.",
        color: "gray",
    },
];

pub fn classify(total_score: Points) -> &'static TierInfo {
    TIER_TABLE
        .iter()
        .find(|info| total_score >= info.min_score)
        .unwrap_or(&TIER_TABLE[TIER_TABLE.len() - 1])
}

/// Like [`classify`] but rejects totals above the maximum score.
pub fn classify_checked(total_score: Points) -> Result<&'static TierInfo> {
    if total_score > MAX_TOTAL_SCORE {
        return Err(ReelPassError::ScoreOutOfRange(total_score));
    }
    Ok(classify(total_score))
}

pub fn info(tier: Tier) -> &'static TierInfo {
    TIER_TABLE
        .iter()
        .find(|info| info.tier == tier)
        .unwrap_or(&TIER_TABLE[TIER_TABLE.len() - 1])
}
