use super::policy::{ProjectPoints, ProjectPolicy};
use crate::types::evidence::{ProjectEvidence, VettingMethod};
use crate::types::scoring::{Category, Points};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectScore {
    pub id: String,
    pub title: String,
    pub vetting_method: VettingMethod,
    pub points: Points,
    /// Policy-derived components; absent when upstream assigned the points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived: Option<ProjectPoints>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    pub raw_total: Points,
    pub points: Points,
    pub projects: Vec<ProjectScore>,
}

pub fn project_score(projects: &[ProjectEvidence], policy: &ProjectPolicy) -> ProjectDetails {
    let scored = projects
        .iter()
        .map(|project| {
            let derived = match project.points {
                Some(_) => None,
                None => Some(policy.derive(project)),
            };
            let points = project
                .points
                .or_else(|| derived.map(|components| components.total()))
                .unwrap_or(0)
                .min(Category::Project.cap());
            ProjectScore {
                id: project.id.clone(),
                title: project.title.clone(),
                vetting_method: project.vetting_method,
                points,
                derived,
            }
        })
        .collect::<Vec<_>>();

    let raw_total = scored
        .iter()
        .fold(0, |sum: Points, project| sum.saturating_add(project.points));

    ProjectDetails {
        raw_total,
        points: raw_total.min(Category::Project.cap()),
        projects: scored,
    }
}
