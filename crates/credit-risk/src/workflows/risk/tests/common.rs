use crate::workflows::risk::domain::{Applicant, EmploymentCategory};

/// Builds an applicant whose raw DTI is exactly `dti` for a zero-rate, one-year loan.
pub(super) fn applicant_with_dti(name: &str, category: EmploymentCategory, dti: f64) -> Applicant {
    let monthly_income = 50_000.0;
    let loan_amount = dti * monthly_income * 12.0;
    Applicant::new(name, 35, monthly_income, category, loan_amount, 1, 0.0, "HDFC")
}

pub(super) fn salaried() -> Applicant {
    Applicant::new(
        "Ravi",
        42,
        85_000.0,
        EmploymentCategory::Salaried,
        1_500_000.0,
        10,
        0.085,
        "SBI",
    )
}

pub(super) fn self_employed() -> Applicant {
    Applicant::new(
        "Meera",
        29,
        40_000.0,
        EmploymentCategory::SelfEmployed,
        600_000.0,
        4,
        0.11,
        "ICICI",
    )
}

pub(super) fn student() -> Applicant {
    Applicant::new(
        "Kabir",
        19,
        12_000.0,
        EmploymentCategory::Student,
        300_000.0,
        7,
        0.095,
        "Canara",
    )
}

pub(super) fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}
