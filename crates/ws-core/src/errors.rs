//! Cross-cutting error types for wsreg.
//!
//! The matcher itself never fails. These errors come from validating what a
//! registrant submitted before it is persisted. Adapter crates define their own
//! error enums (`SheetsError`, `NotifyError`); they converge in `ws-server`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A required form field is missing or blank.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    /// A form field is present but unusable.
    #[error("invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Processing personal data requires explicit consent.
    #[error("GDPR consent is required")]
    ConsentRequired,
}
