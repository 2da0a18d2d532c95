pub mod experience;
pub mod foundational;
pub mod learning;
pub mod persona;
pub mod policy;
pub mod project;
pub mod tier;

use crate::error::Result;
use crate::evidence::{self, DroppedRecord};
use crate::types::evidence::EvidenceBundle;
use crate::types::scoring::{Breakdown, Category, CompositeScore};
use policy::ScoringPolicy;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    pub project: project::ProjectDetails,
    pub persona: persona::PersonaDetails,
    pub foundational: foundational::FoundationalDetails,
    pub experience: experience::ExperienceDetails,
    pub learning: learning::LearningDetails,
}

/// A composite score with the evidence that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub score: CompositeScore,
    pub details: ScoreDetails,
    pub dropped: Vec<DroppedRecord>,
}

impl ScoreReport {
    pub fn has_dropped(&self) -> bool {
        !self.dropped.is_empty()
    }
}

pub fn score(bundle: &EvidenceBundle, policy: &ScoringPolicy) -> CompositeScore {
    evaluate(bundle, policy).score
}

pub fn evaluate(bundle: &EvidenceBundle, policy: &ScoringPolicy) -> ScoreReport {
    let details = ScoreDetails {
        project: project::project_score(&bundle.projects, &policy.project),
        persona: persona::persona_score(&bundle.persona),
        foundational: foundational::foundational_score(
            &bundle.credentials,
            policy.require_verified_credentials,
        ),
        experience: experience::experience_score(&bundle.experience, &policy.experience),
        learning: learning::learning_score(&bundle.learning),
    };

    let breakdown = Breakdown::new(
        details.project.points,
        details.persona.points,
        details.foundational.points,
        details.experience.points,
        details.learning.points,
    );
    for category in Category::ALL {
        debug!(%category, points = breakdown.get(category), cap = category.cap(), "category scored");
    }

    let total_score = breakdown.total();
    let info = tier::classify(total_score);
    debug!(total_score, tier = %info.tier, "composite score computed");

    ScoreReport {
        score: CompositeScore {
            total_score,
            tier: info.tier,
            tier_description: info.description.to_string(),
            breakdown,
        },
        details,
        dropped: Vec::new(),
    }
}

/// Normalizes a raw bundle and scores whatever survives validation.
pub fn evaluate_raw(raw: &Value, policy: &ScoringPolicy) -> Result<ScoreReport> {
    let normalized = evidence::normalize(raw, policy)?;
    if normalized.bundle.is_empty() {
        debug!("bundle carries no usable evidence");
    }
    let mut report = evaluate(&normalized.bundle, policy);
    report.dropped = normalized.dropped;
    Ok(report)
}
