mod policy;

pub use policy::adjustment_multiplier;

use super::domain::{Applicant, RiskTier};
use super::finance::{classify_by_dti, RiskFlags};
use serde::{Deserialize, Serialize};

/// Everything the front end shows for one applicant.
///
/// `flags` come from the raw `dti` while `tier` comes from `adjusted_dti`; the two are
/// deliberately not unified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskEvaluation {
    pub dti: f64,
    pub adjusted_dti: f64,
    pub flags: RiskFlags,
    pub tier: RiskTier,
}

/// Raw DTI scaled by the applicant's employment category multiplier.
pub fn adjusted_dti(applicant: &Applicant) -> f64 {
    applicant.compute_dti() * adjustment_multiplier(applicant.employment_category())
}

pub fn evaluate_risk(applicant: &Applicant) -> RiskTier {
    classify_by_dti(adjusted_dti(applicant))
}

pub fn evaluate(applicant: &Applicant) -> RiskEvaluation {
    let dti = applicant.compute_dti();
    let adjusted_dti = dti * adjustment_multiplier(applicant.employment_category());

    RiskEvaluation {
        dti,
        adjusted_dti,
        flags: applicant.compute_flags(),
        tier: classify_by_dti(adjusted_dti),
    }
}
