use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::finance::{risk_flags, total_payable_simple, RiskFlags};

/// Employment category fixing which risk adjustment applies to an applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentCategory {
    Salaried,
    SelfEmployed,
    Student,
}

impl EmploymentCategory {
    pub const fn ordered() -> [Self; 3] {
        [Self::Salaried, Self::SelfEmployed, Self::Student]
    }

    /// Symbolic name used in record lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            EmploymentCategory::Salaried => "SALARIED",
            EmploymentCategory::SelfEmployed => "SELF_EMPLOYED",
            EmploymentCategory::Student => "STUDENT",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EmploymentCategory::Salaried => "Salaried",
            EmploymentCategory::SelfEmployed => "Self-Employed",
            EmploymentCategory::Student => "Student",
        }
    }
}

impl fmt::Display for EmploymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a symbolic category name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown employment category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for EmploymentCategory {
    type Err = UnknownCategory;

    /// Exact, case-sensitive match on the symbolic name.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

/// Risk tiers ordered from least to most risky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl RiskTier {
    pub const fn ordered() -> [Self; 4] {
        [Self::Excellent, Self::Good, Self::Fair, Self::Poor]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RiskTier::Excellent => "EXCELLENT",
            RiskTier::Good => "GOOD",
            RiskTier::Fair => "FAIR",
            RiskTier::Poor => "POOR",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Loan applicant as entered through the front end or read back from a record line.
///
/// Fields are fixed at construction. DTI and flags are recomputed on every call so they
/// always reflect the stored inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    name: String,
    age: i32,
    monthly_income: f64,
    employment_category: EmploymentCategory,
    loan_amount: f64,
    repayment_years: i32,
    yearly_interest_rate: f64,
    bank_name: String,
}

impl Applicant {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        age: i32,
        monthly_income: f64,
        employment_category: EmploymentCategory,
        loan_amount: f64,
        repayment_years: i32,
        yearly_interest_rate: f64,
        bank_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            monthly_income,
            employment_category,
            loan_amount,
            repayment_years,
            yearly_interest_rate,
            bank_name: bank_name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn monthly_income(&self) -> f64 {
        self.monthly_income
    }

    pub fn employment_category(&self) -> EmploymentCategory {
        self.employment_category
    }

    pub fn loan_amount(&self) -> f64 {
        self.loan_amount
    }

    pub fn repayment_years(&self) -> i32 {
        self.repayment_years
    }

    pub fn yearly_interest_rate(&self) -> f64 {
        self.yearly_interest_rate
    }

    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }

    /// Raw debt-to-income ratio: simple-interest EMI over monthly income.
    ///
    /// Zero income or a zero-year term is not guarded and yields a non-finite ratio.
    pub fn compute_dti(&self) -> f64 {
        let total_payable =
            total_payable_simple(self.loan_amount, self.repayment_years, self.yearly_interest_rate);
        let monthly_emi = total_payable / (f64::from(self.repayment_years) * 12.0);
        monthly_emi / self.monthly_income
    }

    pub fn compute_flags(&self) -> RiskFlags {
        risk_flags(self.compute_dti(), self.monthly_income, self.age)
    }

    /// Comma-joined record line. Commas inside `name` or `bank_name` are written as-is and
    /// break the row on reload.
    pub fn to_record_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            self.name,
            self.age,
            self.monthly_income,
            self.employment_category.as_str(),
            self.loan_amount,
            self.repayment_years,
            self.yearly_interest_rate,
            self.bank_name
        )
    }

    pub fn render(&self) -> String {
        format!(
            "Name: {:<10} | Bank: {:<10} | Loan: {:.2} | Years: {} | Rate: {:.2}%",
            self.name,
            self.bank_name,
            self.loan_amount,
            self.repayment_years,
            self.yearly_interest_rate * 100.0
        )
    }
}
