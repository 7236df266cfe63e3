use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::RiskTier;

const EXCELLENT_CEILING: f64 = 0.20;
const GOOD_CEILING: f64 = 0.35;
const FAIR_CEILING: f64 = 0.50;

const HIGH_DTI_THRESHOLD: f64 = 0.40;
const LOW_INCOME_THRESHOLD: f64 = 25_000.0;
const MIN_SAFE_AGE: i32 = 21;
const MAX_SAFE_AGE: i32 = 60;

/// Principal plus simple interest over the full term.
pub fn total_payable_simple(principal: f64, years: i32, yearly_rate: f64) -> f64 {
    principal + principal * yearly_rate * f64::from(years)
}

/// Principal compounded once per year. Kept as an alternative quote; the DTI pipeline
/// always uses [`total_payable_simple`].
pub fn total_payable_compound(principal: f64, years: i32, yearly_rate: f64) -> f64 {
    let mut amount = principal;
    let mut remaining = years;
    while remaining > 0 {
        amount *= 1.0 + yearly_rate;
        remaining -= 1;
    }
    amount
}

/// Maps a DTI ratio to a tier. Each ceiling is inclusive, and a NaN ratio lands in `Poor`.
pub fn classify_by_dti(dti: f64) -> RiskTier {
    if dti <= EXCELLENT_CEILING {
        RiskTier::Excellent
    } else if dti <= GOOD_CEILING {
        RiskTier::Good
    } else if dti <= FAIR_CEILING {
        RiskTier::Fair
    } else {
        RiskTier::Poor
    }
}

/// Derives the hard risk indicators. Callers pass the raw DTI, never the
/// category-adjusted one.
pub fn risk_flags(dti: f64, income: f64, age: i32) -> RiskFlags {
    let mut flags = RiskFlags::empty();
    if dti > HIGH_DTI_THRESHOLD {
        flags |= RiskFlags::HIGH_DTI;
    }
    if income < LOW_INCOME_THRESHOLD {
        flags |= RiskFlags::LOW_INCOME;
    }
    if !(MIN_SAFE_AGE..=MAX_SAFE_AGE).contains(&age) {
        flags |= RiskFlags::AGE_RISK;
    }
    flags
}

/// Three independent risk bits. Bit 0 is high DTI, bit 1 low income, bit 2 risky age.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskFlags(u8);

impl RiskFlags {
    pub const HIGH_DTI: Self = Self(0b001);
    pub const LOW_INCOME: Self = Self(0b010);
    pub const AGE_RISK: Self = Self(0b100);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn labels(self) -> Vec<&'static str> {
        [
            (Self::HIGH_DTI, "high DTI"),
            (Self::LOW_INCOME, "low income"),
            (Self::AGE_RISK, "age outside 21-60"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, label)| label)
        .collect()
    }
}

impl std::ops::BitOr for RiskFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for RiskFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for RiskFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_total_adds_flat_interest() {
        let total = total_payable_simple(100_000.0, 5, 0.08);
        assert!((total - 140_000.0).abs() < 1e-9);
    }

    #[test]
    fn simple_total_accepts_nonsense_inputs() {
        assert_eq!(total_payable_simple(1_000.0, 0, 0.1), 1_000.0);
        assert!((total_payable_simple(1_000.0, -2, 0.1) - 800.0).abs() < 1e-9);
    }

    #[test]
    fn compound_total_applies_rate_once_per_year() {
        let total = total_payable_compound(1_000.0, 2, 0.10);
        assert!((total - 1_210.0).abs() < 1e-9);
        assert_eq!(total_payable_compound(1_000.0, 0, 0.10), 1_000.0);
        assert_eq!(total_payable_compound(1_000.0, -3, 0.10), 1_000.0);
    }

    #[test]
    fn compound_total_exceeds_simple_total_for_multi_year_terms() {
        assert!(total_payable_compound(50_000.0, 10, 0.08) > total_payable_simple(50_000.0, 10, 0.08));
    }

    #[test]
    fn tier_boundaries_are_inclusive_on_the_lower_tier() {
        assert_eq!(classify_by_dti(0.0), RiskTier::Excellent);
        assert_eq!(classify_by_dti(0.20), RiskTier::Excellent);
        assert_eq!(classify_by_dti(0.200_000_01), RiskTier::Good);
        assert_eq!(classify_by_dti(0.35), RiskTier::Good);
        assert_eq!(classify_by_dti(0.350_000_01), RiskTier::Fair);
        assert_eq!(classify_by_dti(0.50), RiskTier::Fair);
        assert_eq!(classify_by_dti(0.500_000_01), RiskTier::Poor);
    }

    #[test]
    fn non_finite_ratios_have_defined_tiers() {
        assert_eq!(classify_by_dti(f64::NAN), RiskTier::Poor);
        assert_eq!(classify_by_dti(f64::INFINITY), RiskTier::Poor);
        assert_eq!(classify_by_dti(f64::NEG_INFINITY), RiskTier::Excellent);
    }

    #[test]
    fn flags_are_independent_bits() {
        assert_eq!(risk_flags(0.5, 30_000.0, 30).bits(), 0b001);
        assert_eq!(risk_flags(0.1, 20_000.0, 19).bits(), 0b110);
        assert_eq!(risk_flags(0.5, 20_000.0, 70).bits(), 0b111);
        assert!(risk_flags(0.1, 30_000.0, 30).is_empty());
    }

    #[test]
    fn flag_thresholds_are_strict() {
        assert!(risk_flags(0.40, 25_000.0, 21).is_empty());
        assert!(risk_flags(0.1, 30_000.0, 60).is_empty());
        assert_eq!(risk_flags(0.1, 30_000.0, 61), RiskFlags::AGE_RISK);
        assert_eq!(risk_flags(0.1, 30_000.0, 20), RiskFlags::AGE_RISK);
    }

    #[test]
    fn flags_render_as_padded_binary() {
        assert_eq!(risk_flags(0.5, 30_000.0, 30).to_string(), "001");
        assert_eq!(RiskFlags::empty().to_string(), "000");
        assert_eq!(
            (RiskFlags::LOW_INCOME | RiskFlags::AGE_RISK).labels(),
            vec!["low income", "age outside 21-60"]
        );
    }
}
