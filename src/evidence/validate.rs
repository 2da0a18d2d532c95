use crate::scoring::policy::PERSONA_SUBSCORE_CAP;
use crate::types::evidence::{
    CredentialEvidence, ExperienceEvidence, LearningEvidence, PersonaEvidence, ProjectEvidence,
};
use crate::types::scoring::Category;

pub type Check = std::result::Result<(), String>;

const MAX_TRAIT_SCORE: u8 = 100;

pub fn project(record: &ProjectEvidence) -> Check {
    if record.id.trim().is_empty() {
        return Err("id cannot be empty".to_string());
    }
    if record.title.trim().is_empty() {
        return Err("title cannot be empty".to_string());
    }
    if record.vetting_score > 100 {
        return Err(format!(
            "vettingScore {} outside 0..=100",
            record.vetting_score
        ));
    }
    if let Some(points) = record.points {
        within_cap(points, Category::Project)?;
    }
    Ok(())
}

pub fn credential(record: &CredentialEvidence) -> Check {
    if record.institution.trim().is_empty() {
        return Err("institution cannot be empty".to_string());
    }
    if let Some(expiry) = record.expiry_date {
        if expiry < record.date_obtained {
            return Err(format!(
                "expiryDate {} precedes dateObtained {}",
                expiry, record.date_obtained
            ));
        }
    }
    within_cap(record.points, Category::Foundational)
}

pub fn learning(record: &LearningEvidence) -> Check {
    if record.provider.trim().is_empty() {
        return Err("provider cannot be empty".to_string());
    }
    within_cap(record.points, Category::Learning)
}

pub fn persona(record: &PersonaEvidence) -> Check {
    let traits = record
        .big_five_scores
        .values()
        .into_iter()
        .chain(record.work_relevant_traits.values());
    for (name, value) in traits {
        if value > MAX_TRAIT_SCORE {
            return Err(format!("{name} score {value} outside 0..=100"));
        }
    }
    for (name, value) in [
        ("behavioralAssessment", record.behavioral_assessment),
        ("peerManagerialFeedback", record.peer_managerial_feedback),
    ] {
        if value > PERSONA_SUBSCORE_CAP {
            return Err(format!(
                "{name} {value} exceeds sub-score cap {PERSONA_SUBSCORE_CAP}"
            ));
        }
    }
    Ok(())
}

pub fn experience(record: &ExperienceEvidence) -> Check {
    if !record.relevant_years.is_finite() || record.relevant_years < 0.0 {
        return Err(format!(
            "relevantYears {} must be a non-negative number",
            record.relevant_years
        ));
    }
    Ok(())
}

fn within_cap(points: u32, category: Category) -> Check {
    let cap = category.cap();
    if points > cap {
        return Err(format!("points {points} exceed {category} cap {cap}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::evidence::{
        AiAnalysis, BigFiveScores, Complexity, CredentialKind, Impact, VerificationBonuses,
        VerificationStatus, VettingMethod, WorkTraitScores,
    };
    use chrono::NaiveDate;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("date should parse")
    }

    fn sample_project() -> ProjectEvidence {
        ProjectEvidence {
            id: "proj-1".to_string(),
            title: "Mobile Banking Security Module".to_string(),
            skills_demonstrated: vec!["Encryption".to_string()],
            vetting_method: VettingMethod::Peer,
            vetting_score: 95,
            complexity: Complexity::Large,
            impact: Impact::Significant,
            verification_bonuses: VerificationBonuses::default(),
            points: Some(90),
        }
    }

    #[test]
    fn project_rejects_out_of_range_values() {
        assert!(project(&sample_project()).is_ok());

        let mut over_score = sample_project();
        over_score.vetting_score = 101;
        assert!(project(&over_score)
            .expect_err("score should fail")
            .contains("vettingScore"));

        let mut over_cap = sample_project();
        over_cap.points = Some(501);
        assert!(project(&over_cap)
            .expect_err("points should fail")
            .contains("project cap 500"));

        let mut blank = sample_project();
        blank.id = " ".to_string();
        assert!(project(&blank).is_err());
    }

    #[test]
    fn credential_rejects_expiry_before_obtained() {
        let record = CredentialEvidence {
            kind: CredentialKind::Certification,
            name: "Certified Scrum Master".to_string(),
            institution: "Scrum Alliance".to_string(),
            date_obtained: date("2022-03-20"),
            expiry_date: Some(date("2021-03-20")),
            verification_status: VerificationStatus::Verified,
            points: 15,
        };
        assert!(credential(&record)
            .expect_err("expiry should fail")
            .contains("precedes"));
    }

    #[test]
    fn persona_rejects_trait_and_subscore_overflow() {
        let mut record = PersonaEvidence {
            big_five_scores: BigFiveScores {
                openness: 78,
                conscientiousness: 85,
                extraversion: 72,
                agreeableness: 81,
                neuroticism: 35,
            },
            work_relevant_traits: WorkTraitScores {
                communication: 88,
                problem_solving: 92,
                collaboration: 85,
                adaptability: 89,
                leadership: 78,
            },
            ai_analysis: AiAnalysis::default(),
            behavioral_assessment: 85,
            peer_managerial_feedback: 65,
        };
        assert!(persona(&record).is_ok());

        record.work_relevant_traits.leadership = 120;
        assert!(persona(&record)
            .expect_err("trait should fail")
            .contains("leadership"));

        record.work_relevant_traits.leadership = 78;
        record.peer_managerial_feedback = 140;
        assert!(persona(&record)
            .expect_err("sub-score should fail")
            .contains("peerManagerialFeedback"));
    }

    #[test]
    fn experience_rejects_negative_years() {
        let record = ExperienceEvidence {
            relevant_years: -1.0,
            experience_areas: vec![],
        };
        assert!(experience(&record).is_err());
    }
}
