use crate::types::evidence::{CredentialEvidence, CredentialKind, VerificationStatus};
use crate::types::scoring::{Category, Points};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundationalDetails {
    /// Certifications and licenses.
    pub certifications: Points,
    pub degrees: Points,
    pub excluded_unverified: usize,
    pub raw_total: Points,
    pub points: Points,
}

pub fn foundational_score(
    credentials: &[CredentialEvidence],
    require_verified: bool,
) -> FoundationalDetails {
    let mut details = FoundationalDetails::default();
    for credential in credentials {
        if require_verified && credential.verification_status != VerificationStatus::Verified {
            details.excluded_unverified += 1;
            continue;
        }
        match credential.kind {
            CredentialKind::Degree => {
                details.degrees = details.degrees.saturating_add(credential.points)
            }
            CredentialKind::Certification | CredentialKind::License => {
                details.certifications = details.certifications.saturating_add(credential.points)
            }
        }
    }
    details.raw_total = details.certifications.saturating_add(details.degrees);
    details.points = details.raw_total.min(Category::Foundational.cap());
    details
}
