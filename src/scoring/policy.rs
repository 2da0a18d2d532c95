use crate::types::evidence::{Complexity, Impact, ProjectEvidence};
use crate::types::scoring::Points;
use serde::{Deserialize, Serialize};

/// Upper bound on the years-based part of the experience score.
pub const YEARS_CAP: Points = 50;
/// Upper bound on the diversity-based part of the experience score.
pub const DIVERSITY_CAP: Points = 50;
/// Upper bound on each persona sub-score.
pub const PERSONA_SUBSCORE_CAP: Points = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VettingBand {
    pub floor: u8,
    pub points: Points,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectPoints {
    pub vetting: Points,
    pub complexity: Points,
    pub impact: Points,
    pub bonus: Points,
}

impl ProjectPoints {
    pub fn total(&self) -> Points {
        self.vetting + self.complexity + self.impact + self.bonus
    }
}

/// Maps a project's vetting confidence, complexity, impact and bonus flags to
/// a point value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPolicy {
    /// Sorted by descending floor; the first band whose floor the score
    /// reaches wins.
    vetting_bands: Vec<VettingBand>,
    complexity: [Points; 4],
    impact: [Points; 4],
    bonus_points: Points,
}

impl Default for ProjectPolicy {
    fn default() -> Self {
        Self::new(
            vec![
                VettingBand {
                    floor: 90,
                    points: 45,
                },
                VettingBand {
                    floor: 80,
                    points: 40,
                },
                VettingBand {
                    floor: 70,
                    points: 30,
                },
                VettingBand {
                    floor: 60,
                    points: 20,
                },
                VettingBand {
                    floor: 50,
                    points: 10,
                },
            ],
            [5, 10, 15, 20],
            [0, 5, 10, 15],
            5,
        )
    }
}

impl ProjectPolicy {
    pub fn new(
        mut vetting_bands: Vec<VettingBand>,
        complexity: [Points; 4],
        impact: [Points; 4],
        bonus_points: Points,
    ) -> Self {
        vetting_bands.sort_by(|a, b| b.floor.cmp(&a.floor));
        Self {
            vetting_bands,
            complexity,
            impact,
            bonus_points,
        }
    }

    pub fn vetting_bands(&self) -> &[VettingBand] {
        &self.vetting_bands
    }

    pub fn vetting_points(&self, vetting_score: u8) -> Points {
        self.vetting_bands
            .iter()
            .find(|band| vetting_score >= band.floor)
            .map(|band| band.points)
            .unwrap_or(0)
    }

    pub fn complexity_points(&self, complexity: Complexity) -> Points {
        self.complexity[complexity as usize]
    }

    pub fn impact_points(&self, impact: Impact) -> Points {
        self.impact[impact as usize]
    }

    pub fn bonus_points(&self) -> Points {
        self.bonus_points
    }

    pub fn derive(&self, project: &ProjectEvidence) -> ProjectPoints {
        ProjectPoints {
            vetting: self.vetting_points(project.vetting_score),
            complexity: self.complexity_points(project.complexity),
            impact: self.impact_points(project.impact),
            bonus: self.bonus_points * project.verification_bonuses.count(),
        }
    }

    /// Largest value a single project can be assigned by this policy.
    pub fn max_points(&self) -> Points {
        let vetting = self
            .vetting_bands
            .iter()
            .map(|band| band.points)
            .max()
            .unwrap_or(0);
        let complexity = self.complexity.iter().copied().max().unwrap_or(0);
        let impact = self.impact.iter().copied().max().unwrap_or(0);
        vetting
            .saturating_add(complexity)
            .saturating_add(impact)
            .saturating_add(self.bonus_points.saturating_mul(4))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperiencePolicy {
    pub points_per_year: Points,
    pub points_per_area: Points,
}

impl Default for ExperiencePolicy {
    fn default() -> Self {
        Self {
            points_per_year: 5,
            points_per_area: 5,
        }
    }
}

impl ExperiencePolicy {
    pub fn years_points(&self, years: f64) -> Points {
        if !years.is_finite() || years <= 0.0 {
            return 0;
        }
        let raw = (years * f64::from(self.points_per_year)).floor();
        if raw >= f64::from(YEARS_CAP) {
            YEARS_CAP
        } else {
            raw as Points
        }
    }

    pub fn diversity_points(&self, distinct_areas: usize) -> Points {
        let areas = Points::try_from(distinct_areas).unwrap_or(Points::MAX);
        areas.saturating_mul(self.points_per_area).min(DIVERSITY_CAP)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub project: ProjectPolicy,
    pub experience: ExperiencePolicy,
    pub require_verified_credentials: bool,
    pub allow_missing_categories: bool,
}
