use crate::error::ReelPassError;
use crate::links::ExpirationPolicy;
use crate::scoring::policy::{ExperiencePolicy, ProjectPolicy, ScoringPolicy, VettingBand};
use crate::types::evidence::{Complexity, Impact};
use crate::types::scoring::Category;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5174/public";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReelPassConfig {
    pub scoring: Option<ScoringConfig>,
    pub links: Option<LinksConfig>,
    pub logging: Option<LoggingConfig>,
    /// Files merged into this config, lowest precedence first.
    #[serde(skip)]
    pub layers: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub allow_missing_categories: bool,
    #[serde(default)]
    pub require_verified_credentials: bool,
    pub project: Option<ProjectPolicyConfig>,
    pub experience: Option<ExperiencePolicyConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPolicyConfig {
    pub bonus_points: Option<u32>,
    pub complexity: Option<HashMap<String, u32>>,
    pub impact: Option<HashMap<String, u32>>,
    pub vetting_bands: Option<Vec<VettingBand>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperiencePolicyConfig {
    pub points_per_year: Option<u32>,
    pub points_per_area: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinksConfig {
    pub default_expiration: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl ReelPassConfig {
    pub fn scoring_policy(&self) -> ScoringPolicy {
        let defaults = ScoringPolicy::default();
        let Some(scoring) = &self.scoring else {
            return defaults;
        };

        let project = match &scoring.project {
            Some(project) => {
                let base = ProjectPolicy::default();
                let complexity = Complexity::ALL.map(|level| {
                    lookup(project.complexity.as_ref(), level.key())
                        .unwrap_or_else(|| base.complexity_points(level))
                });
                let impact = Impact::ALL.map(|level| {
                    lookup(project.impact.as_ref(), level.key())
                        .unwrap_or_else(|| base.impact_points(level))
                });
                ProjectPolicy::new(
                    project
                        .vetting_bands
                        .clone()
                        .unwrap_or_else(|| base.vetting_bands().to_vec()),
                    complexity,
                    impact,
                    project.bonus_points.unwrap_or_else(|| base.bonus_points()),
                )
            }
            None => defaults.project,
        };

        let experience = match &scoring.experience {
            Some(experience) => ExperiencePolicy {
                points_per_year: experience
                    .points_per_year
                    .unwrap_or(defaults.experience.points_per_year),
                points_per_area: experience
                    .points_per_area
                    .unwrap_or(defaults.experience.points_per_area),
            },
            None => defaults.experience,
        };

        ScoringPolicy {
            project,
            experience,
            require_verified_credentials: scoring.require_verified_credentials,
            allow_missing_categories: scoring.allow_missing_categories,
        }
    }

    pub fn default_expiration(&self) -> Result<ExpirationPolicy, ReelPassError> {
        match self
            .links
            .as_ref()
            .and_then(|links| links.default_expiration.as_deref())
        {
            Some(value) => value.parse(),
            None => Ok(ExpirationPolicy::Days90),
        }
    }

    pub fn base_url(&self) -> &str {
        self.links
            .as_ref()
            .and_then(|links| links.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging
            .as_ref()
            .and_then(|logging| logging.level.as_deref())
    }

    pub fn validate(&self) -> Result<(), ReelPassError> {
        if let Some(project) = self
            .scoring
            .as_ref()
            .and_then(|scoring| scoring.project.as_ref())
        {
            validate_level_keys(
                "scoring.project.complexity",
                project.complexity.as_ref(),
                &Complexity::ALL.map(Complexity::key),
            )?;
            validate_level_keys(
                "scoring.project.impact",
                project.impact.as_ref(),
                &Impact::ALL.map(Impact::key),
            )?;

            if let Some(bands) = &project.vetting_bands {
                let mut floors = HashSet::new();
                for band in bands {
                    if band.floor > 100 {
                        return Err(ReelPassError::ConfigParse(format!(
                            "scoring.project.vetting_bands floor must be between 0 and 100 (found {})",
                            band.floor
                        )));
                    }
                    if !floors.insert(band.floor) {
                        return Err(ReelPassError::ConfigParse(format!(
                            "scoring.project.vetting_bands contains duplicate floor: {}",
                            band.floor
                        )));
                    }
                }
            }
        }

        let policy = self.scoring_policy();
        let project_cap = Category::Project.cap();
        if policy.project.max_points() > project_cap {
            return Err(ReelPassError::ConfigParse(format!(
                "scoring.project policy can assign {} points to one project (cap is {})",
                policy.project.max_points(),
                project_cap
            )));
        }

        if let Some(level) = self.log_level() {
            if level.trim().is_empty() {
                return Err(ReelPassError::ConfigParse(
                    "logging.level cannot be empty".to_string(),
                ));
            }
        }

        self.default_expiration().map_err(|err| {
            ReelPassError::ConfigParse(format!("links.default_expiration: {err}"))
        })?;

        Ok(())
    }
}

fn lookup(table: Option<&HashMap<String, u32>>, key: &str) -> Option<u32> {
    table.and_then(|table| table.get(key).copied())
}

fn validate_level_keys(
    section: &str,
    table: Option<&HashMap<String, u32>>,
    allowed: &[&str],
) -> Result<(), ReelPassError> {
    let Some(table) = table else {
        return Ok(());
    };
    let mut unknown = table
        .keys()
        .filter(|key| !allowed.contains(&key.as_str()))
        .cloned()
        .collect::<Vec<_>>();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort();
    Err(ReelPassError::ConfigParse(format!(
        "{section} contains unknown key(s): {}",
        unknown.join(", ")
    )))
}
