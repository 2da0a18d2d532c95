use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VettingMethod {
    Ai,
    Professional,
    Peer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Small,
    Medium,
    Large,
    Enterprise,
}

impl Complexity {
    pub const ALL: [Complexity; 4] = [
        Complexity::Small,
        Complexity::Medium,
        Complexity::Large,
        Complexity::Enterprise,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Complexity::Small => "small",
            Complexity::Medium => "medium",
            Complexity::Large => "large",
            Complexity::Enterprise => "enterprise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
    Significant,
}

impl Impact {
    pub const ALL: [Impact; 4] = [Impact::Low, Impact::Medium, Impact::High, Impact::Significant];

    pub fn key(self) -> &'static str {
        match self {
            Impact::Low => "low",
            Impact::Medium => "medium",
            Impact::High => "high",
            Impact::Significant => "significant",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationBonuses {
    #[serde(default)]
    pub external_validation: bool,
    #[serde(default)]
    pub live_demo: bool,
    #[serde(default)]
    pub client_testimonial: bool,
    #[serde(default)]
    pub community_engagement: bool,
}

impl VerificationBonuses {
    pub fn count(&self) -> u32 {
        [
            self.external_validation,
            self.live_demo,
            self.client_testimonial,
            self.community_engagement,
        ]
        .iter()
        .filter(|flag| **flag)
        .count() as u32
    }
}

/// One vetted project. `points` is the upstream-assigned value; when it is
/// absent the project policy derives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEvidence {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub skills_demonstrated: Vec<String>,
    pub vetting_method: VettingMethod,
    pub vetting_score: u8,
    pub complexity: Complexity,
    pub impact: Impact,
    #[serde(default)]
    pub verification_bonuses: VerificationBonuses,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Pending,
    Unverified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialKind {
    Certification,
    Degree,
    License,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialEvidence {
    #[serde(rename = "type")]
    pub kind: CredentialKind,
    #[serde(default)]
    pub name: String,
    pub institution: String,
    pub date_obtained: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub verification_status: VerificationStatus,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningKind {
    Course,
    Workshop,
    Bootcamp,
    Certification,
    Conference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningEvidence {
    #[serde(rename = "type")]
    pub kind: LearningKind,
    #[serde(default)]
    pub title: String,
    pub provider: String,
    pub completion_date: NaiveDate,
    pub verification_status: VerificationStatus,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BigFiveScores {
    pub openness: u8,
    pub conscientiousness: u8,
    pub extraversion: u8,
    pub agreeableness: u8,
    pub neuroticism: u8,
}

impl BigFiveScores {
    pub fn values(&self) -> [(&'static str, u8); 5] {
        [
            ("openness", self.openness),
            ("conscientiousness", self.conscientiousness),
            ("extraversion", self.extraversion),
            ("agreeableness", self.agreeableness),
            ("neuroticism", self.neuroticism),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkTraitScores {
    pub communication: u8,
    pub problem_solving: u8,
    pub collaboration: u8,
    pub adaptability: u8,
    pub leadership: u8,
}

impl WorkTraitScores {
    pub fn values(&self) -> [(&'static str, u8); 5] {
        [
            ("communication", self.communication),
            ("problemSolving", self.problem_solving),
            ("collaboration", self.collaboration),
            ("adaptability", self.adaptability),
            ("leadership", self.leadership),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    #[serde(default)]
    pub communication_patterns: String,
    #[serde(default)]
    pub work_style: String,
    #[serde(default)]
    pub strengths_identified: Vec<String>,
    #[serde(default)]
    pub development_areas: Vec<String>,
}

/// Behavioral assessment snapshot. Trait scores are descriptive; only the two
/// pre-computed sub-scores feed the persona total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaEvidence {
    pub big_five_scores: BigFiveScores,
    pub work_relevant_traits: WorkTraitScores,
    #[serde(default)]
    pub ai_analysis: AiAnalysis,
    pub behavioral_assessment: u32,
    pub peer_managerial_feedback: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEvidence {
    pub relevant_years: f64,
    #[serde(default)]
    pub experience_areas: Vec<String>,
}

impl ExperienceEvidence {
    /// Distinct areas after trimming, compared case-insensitively. Blank
    /// entries do not count.
    pub fn distinct_areas(&self) -> usize {
        let mut seen = std::collections::BTreeSet::new();
        for area in &self.experience_areas {
            let normalized = area.trim().to_lowercase();
            if !normalized.is_empty() {
                seen.insert(normalized);
            }
        }
        seen.len()
    }
}

/// Validated evidence, one ordered container per category. Every container
/// may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceBundle {
    pub projects: Vec<ProjectEvidence>,
    pub persona: Vec<PersonaEvidence>,
    pub credentials: Vec<CredentialEvidence>,
    pub learning: Vec<LearningEvidence>,
    pub experience: Vec<ExperienceEvidence>,
}

impl EvidenceBundle {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
            && self.persona.is_empty()
            && self.credentials.is_empty()
            && self.learning.is_empty()
            && self.experience.is_empty()
    }
}
