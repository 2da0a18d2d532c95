use crate::evidence::DroppedRecord;
use crate::scoring::{ScoreDetails, ScoreReport};
use crate::types::scoring::CompositeScore;
use serde::Serialize;

/// Wire shape of the `score` command. The composite score fields sit at the
/// top level so consumers of the plain score contract can read them directly.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreDocument<'a> {
    #[serde(flatten)]
    score: &'a CompositeScore,
    details: &'a ScoreDetails,
    #[serde(skip_serializing_if = "no_records")]
    dropped: &'a [DroppedRecord],
}

fn no_records(records: &&[DroppedRecord]) -> bool {
    records.is_empty()
}

pub fn to_json(report: &ScoreReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ScoreDocument {
        score: &report.score,
        details: &report.details,
        dropped: &report.dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::evaluate;
    use crate::scoring::policy::ScoringPolicy;
    use crate::types::evidence::EvidenceBundle;

    #[test]
    fn json_report_contains_composite_contract() {
        let report = evaluate(&EvidenceBundle::default(), &ScoringPolicy::default());
        let rendered = to_json(&report).expect("json should serialize");
        assert!(rendered.contains("\"totalScore\": 0"));
        assert!(rendered.contains("\"tier\": \"aspiring\""));
        assert!(rendered.contains("\"breakdown\""));
        assert!(!rendered.contains("\"dropped\""));
    }
}
