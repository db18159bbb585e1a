//! Utility modules shared across the library.
//!
//! - [`validate_submission`]: input validation run before any search work starts
//! - [`clamp_budget`], [`clamp_impact_factor`]: keep filter values within the
//!   ranges of the dashboard controls
//! - [`ValidationError`]: the single user-facing error kind
//! - [`truncate_with_ellipsis`], [`wrap_text`]: unicode-aware text layout for
//!   terminal output
//!
//! # Validation
//!
//! ```rust
//! use journal_finder::utils::{validate_submission, ValidationError};
//!
//! assert!(validate_submission("Sparse attention", "We propose...").is_ok());
//! assert_eq!(
//!     validate_submission("", "We propose..."),
//!     Err(ValidationError::MissingSubmission)
//! );
//! ```

mod display;
mod validate;

pub use display::{display_width, format_cost, format_percent, truncate_with_ellipsis, wrap_text};
pub use validate::{
    clamp_budget, clamp_impact_factor, validate_submission, ValidationError, MAX_BUDGET,
    MAX_IMPACT_FACTOR,
};
