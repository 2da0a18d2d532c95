use super::policy::PERSONA_SUBSCORE_CAP;
use crate::types::evidence::PersonaEvidence;
use crate::types::scoring::{Category, Points};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaDetails {
    pub behavioral_assessment: Points,
    pub peer_managerial_feedback: Points,
    pub points: Points,
    pub strengths: Vec<String>,
    pub development_areas: Vec<String>,
}

/// Scores the most recent assessment; earlier snapshots are superseded.
pub fn persona_score(persona: &[PersonaEvidence]) -> PersonaDetails {
    let Some(latest) = persona.last() else {
        return PersonaDetails::default();
    };
    let behavioral = latest.behavioral_assessment.min(PERSONA_SUBSCORE_CAP);
    let feedback = latest.peer_managerial_feedback.min(PERSONA_SUBSCORE_CAP);
    PersonaDetails {
        behavioral_assessment: behavioral,
        peer_managerial_feedback: feedback,
        points: (behavioral + feedback).min(Category::Persona.cap()),
        strengths: latest.ai_analysis.strengths_identified.clone(),
        development_areas: latest.ai_analysis.development_areas.clone(),
    }
}
