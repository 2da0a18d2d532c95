use super::policy::ExperiencePolicy;
use crate::types::evidence::ExperienceEvidence;
use crate::types::scoring::{Category, Points};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceDetails {
    pub relevant_years: Points,
    pub skill_category_diversity: Points,
    pub distinct_areas: usize,
    pub points: Points,
}

/// Scores the most recent experience summary.
pub fn experience_score(
    experience: &[ExperienceEvidence],
    policy: &ExperiencePolicy,
) -> ExperienceDetails {
    let Some(latest) = experience.last() else {
        return ExperienceDetails::default();
    };
    let distinct_areas = latest.distinct_areas();
    let relevant_years = policy.years_points(latest.relevant_years);
    let skill_category_diversity = policy.diversity_points(distinct_areas);
    ExperienceDetails {
        relevant_years,
        skill_category_diversity,
        distinct_areas,
        points: (relevant_years + skill_category_diversity).min(Category::Experience.cap()),
    }
}
