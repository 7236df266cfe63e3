use serde::{Deserialize, Serialize};

use super::super::domain::{Applicant, RiskTier};
use super::super::evaluation::evaluate_risk;

/// Aggregate DTI statistics for a non-empty portfolio.
///
/// The min/max/mean figures use raw DTI; tier counts use the category-adjusted tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub applicants: usize,
    pub min_dti: f64,
    pub max_dti: f64,
    pub mean_dti: f64,
    pub excellent_count: usize,
    pub tier_counts: Vec<TierCountEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCountEntry {
    pub tier: RiskTier,
    pub count: usize,
}

impl PortfolioSummary {
    pub fn count_for(&self, tier: RiskTier) -> usize {
        self.tier_counts
            .iter()
            .find(|entry| entry.tier == tier)
            .map_or(0, |entry| entry.count)
    }
}

pub(super) fn summarize(applicants: &[Applicant]) -> Option<PortfolioSummary> {
    let first = applicants.first()?.compute_dti();
    let mut min_dti = first;
    let mut max_dti = first;
    let mut sum = 0.0;

    for applicant in applicants {
        let dti = applicant.compute_dti();
        if dti < min_dti {
            min_dti = dti;
        }
        if dti > max_dti {
            max_dti = dti;
        }
        sum += dti;
    }

    let tiers: Vec<RiskTier> = applicants.iter().map(evaluate_risk).collect();
    let tier_counts: Vec<TierCountEntry> = RiskTier::ordered()
        .into_iter()
        .map(|tier| TierCountEntry {
            tier,
            count: tiers.iter().filter(|candidate| **candidate == tier).count(),
        })
        .collect();

    let mut summary = PortfolioSummary {
        applicants: applicants.len(),
        min_dti,
        max_dti,
        mean_dti: sum / applicants.len() as f64,
        excellent_count: 0,
        tier_counts,
    };
    summary.excellent_count = summary.count_for(RiskTier::Excellent);
    Some(summary)
}
