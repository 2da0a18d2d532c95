use crate::types::evidence::LearningEvidence;
use crate::types::scoring::{Category, Points};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningDetails {
    pub activities: usize,
    pub raw_total: Points,
    pub points: Points,
}

pub fn learning_score(activities: &[LearningEvidence]) -> LearningDetails {
    let raw_total = activities
        .iter()
        .fold(0, |sum: Points, activity| sum.saturating_add(activity.points));
    LearningDetails {
        activities: activities.len(),
        raw_total,
        points: raw_total.min(Category::Learning.cap()),
    }
}
