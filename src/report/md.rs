use crate::scoring::tier;
use crate::scoring::ScoreReport;
use crate::types::scoring::Category;

pub fn to_markdown(report: &ScoreReport) -> String {
    let score = &report.score;
    let info = tier::info(score.tier);
    let mut output = String::new();
    output.push_str("# ReelPass Score\n\n");
    output.push_str(&format!("Total score: {} / 1000\n\n", score.total_score));
    output.push_str(&format!("Tier: {} ({})\n\n", info.label, info.color));
    output.push_str(&format!("{}\n\n", score.tier_description));

    output.push_str("## Breakdown\n\n");
    output.push_str("| Category | Points | Cap | Weight |\n|---|---|---|---|\n");
    for category in Category::ALL {
        let spec = category.spec();
        output.push_str(&format!(
            "| {} | {} | {} | {}% |\n",
            spec.label,
            score.breakdown.get(category),
            spec.cap,
            spec.weight_percent
        ));
    }
    output.push('\n');

    output.push_str("## Projects\n\n");
    if report.details.project.projects.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for project in &report.details.project.projects {
            let source = if project.derived.is_some() {
                "derived"
            } else {
                "assigned"
            };
            output.push_str(&format!(
                "- {} ({}): {} points, {}\n",
                project.title, project.id, project.points, source
            ));
        }
        output.push('\n');
    }

    let foundational = &report.details.foundational;
    let experience = &report.details.experience;
    output.push_str("## Details\n\n");
    output.push_str(&format!(
        "- persona: behavioral {}, peer/managerial {}\n- foundational: certifications {}, degrees {}, unverified excluded {}\n- experience: years {}, diversity {} ({} areas)\n- learning: {} activities, {} points before cap\n\n",
        report.details.persona.behavioral_assessment,
        report.details.persona.peer_managerial_feedback,
        foundational.certifications,
        foundational.degrees,
        foundational.excluded_unverified,
        experience.relevant_years,
        experience.skill_category_diversity,
        experience.distinct_areas,
        report.details.learning.activities,
        report.details.learning.raw_total
    ));

    output.push_str("## Dropped Records\n\n");
    if report.dropped.is_empty() {
        output.push_str("- none\n");
    } else {
        for record in &report.dropped {
            output.push_str(&format!(
                "- [{}] record {}: {}\n",
                record.category, record.index, record.reason
            ));
        }
    }

    output
}
