use crate::error::{ReelPassError, Result};
use crate::links::PublicLink;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Profile fields that count towards completeness, with their weights.
const COMPLETENESS_WEIGHTS: [(ProfileField, u32); 9] = [
    (ProfileField::FirstName, 15),
    (ProfileField::LastName, 15),
    (ProfileField::Title, 15),
    (ProfileField::Bio, 15),
    (ProfileField::Location, 10),
    (ProfileField::Email, 10),
    (ProfileField::Linkedin, 5),
    (ProfileField::Github, 5),
    (ProfileField::Portfolio, 5),
];
const HAS_SKILLS_WEIGHT: u32 = 5;

#[derive(Debug, Clone, Copy)]
enum ProfileField {
    FirstName,
    LastName,
    Title,
    Bio,
    Location,
    Email,
    Linkedin,
    Github,
    Portfolio,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,
}

impl ProfileFields {
    fn field(&self, field: ProfileField) -> Option<&str> {
        let value = match field {
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::Title => &self.title,
            ProfileField::Bio => &self.bio,
            ProfileField::Location => &self.location,
            ProfileField::Email => &self.email,
            ProfileField::Linkedin => &self.linkedin_url,
            ProfileField::Github => &self.github_url,
            ProfileField::Portfolio => &self.portfolio_url,
        };
        value.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub endorsements: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProject {
    pub title: String,
    #[serde(default = "completed")]
    pub status: String,
}

fn completed() -> String {
    "completed".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub professional_id: String,
    pub profile: Option<ProfileFields>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<PortfolioProject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub professional_id: String,
    pub total_views: u64,
    pub link_shares: usize,
    pub skills: usize,
    pub completed_projects: usize,
    pub profile_completeness: u32,
    pub portfolio_score: u32,
}

pub fn load_portfolio(path: &Path) -> Result<Portfolio> {
    if !path.exists() {
        return Err(ReelPassError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Weighted share of filled-in profile fields, 0..=100. A missing profile
/// scores zero even when skills exist.
pub fn profile_completeness(profile: Option<&ProfileFields>, has_skills: bool) -> u32 {
    let Some(profile) = profile else {
        return 0;
    };
    let fields: u32 = COMPLETENESS_WEIGHTS
        .iter()
        .filter(|(field, _)| {
            profile
                .field(*field)
                .is_some_and(|value| !value.trim().is_empty())
        })
        .map(|(_, weight)| weight)
        .sum();
    if has_skills {
        fields + HAS_SKILLS_WEIGHT
    } else {
        fields
    }
}

pub fn portfolio_score(
    skills: &[Skill],
    completed_projects: usize,
    total_views: u64,
) -> u32 {
    let endorsements: u64 = skills.iter().map(|skill| u64::from(skill.endorsements)).sum();
    let verified = skills.iter().filter(|skill| skill.verified).count();

    let skills_part = (skills.len() as f64 * 2.0).min(30.0);
    let projects_part = (completed_projects as f64 * 5.0).min(25.0);
    let views_part = (total_views as f64 / 10.0).min(20.0);
    let endorsements_part = (endorsements as f64 / 5.0).min(15.0);
    let verified_part = (verified as f64 * 2.0).min(10.0);

    (skills_part + projects_part + views_part + endorsements_part + verified_part).round() as u32
}

/// Combines a portfolio with every public link the professional has ever
/// had. Views count across all links; shares only count non-revoked ones.
pub fn stats(portfolio: &Portfolio, links: &[PublicLink]) -> PortfolioStats {
    let own_links = links
        .iter()
        .filter(|link| link.professional_id == portfolio.professional_id);
    let (total_views, link_shares) = own_links.fold((0u64, 0usize), |(views, shares), link| {
        let shares = if link.revoked { shares } else { shares + 1 };
        (views.saturating_add(link.view_count), shares)
    });
    let completed_projects = portfolio
        .projects
        .iter()
        .filter(|project| project.status.eq_ignore_ascii_case("completed"))
        .count();

    PortfolioStats {
        professional_id: portfolio.professional_id.clone(),
        total_views,
        link_shares,
        skills: portfolio.skills.len(),
        completed_projects,
        profile_completeness: profile_completeness(
            portfolio.profile.as_ref(),
            !portfolio.skills.is_empty(),
        ),
        portfolio_score: portfolio_score(&portfolio.skills, completed_projects, total_views),
    }
}
