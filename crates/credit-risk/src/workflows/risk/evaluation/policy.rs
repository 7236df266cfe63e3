use super::super::domain::EmploymentCategory;

/// DTI multiplier applied before tier classification.
pub const fn adjustment_multiplier(category: EmploymentCategory) -> f64 {
    match category {
        EmploymentCategory::Salaried => 1.0,
        EmploymentCategory::SelfEmployed => 1.10,
        EmploymentCategory::Student => 1.20,
    }
}
