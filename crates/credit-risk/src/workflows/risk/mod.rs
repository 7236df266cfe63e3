//! Credit risk evaluation: DTI math, per-category tier adjustment, risk flags, and the
//! flat-file portfolio of applicants.

pub mod domain;
pub mod evaluation;
pub mod finance;
pub mod portfolio;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{Applicant, EmploymentCategory, RiskTier, UnknownCategory};
pub use evaluation::{adjusted_dti, adjustment_multiplier, evaluate, evaluate_risk, RiskEvaluation};
pub use finance::{
    classify_by_dti, risk_flags, total_payable_compound, total_payable_simple, RiskFlags,
};
pub use portfolio::{
    InvalidRowPolicy, LoadError, LoadReport, Portfolio, PortfolioSummary, RejectedRow, RowError,
    TierCountEntry,
};
pub use store::{FileRecordStore, RecordStore, StoreError};
