//! Input validation for search submissions and filter values.
//!
//! Validation happens before any search work starts: a rejected submission
//! never reaches the catalog. Filter values are not errors when out of
//! range; the dashboard controls clamp them the way a slider would.

use thiserror::Error;

/// Upper bound of the budget control
pub const MAX_BUDGET: u32 = 5000;

/// Upper bound of the minimum impact factor control
pub const MAX_IMPACT_FACTOR: f64 = 10.0;

/// Validation error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter both title and abstract")]
    MissingSubmission,
}

/// Require a non-blank title and abstract
pub fn validate_submission(title: &str, abstract_text: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() || abstract_text.trim().is_empty() {
        return Err(ValidationError::MissingSubmission);
    }
    Ok(())
}

/// Clamp a budget to the control's range
pub fn clamp_budget(budget: u32) -> u32 {
    budget.min(MAX_BUDGET)
}

/// Clamp a minimum impact factor to the control's range
///
/// Non-finite input resets to zero.
pub fn clamp_impact_factor(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, MAX_IMPACT_FACTOR)
    } else {
        0.0
    }
}
