//! Domain-level errors.
//!
//! These errors describe values that do not fit the domain model.
//! They are independent of transport concerns (HTTP, storage).

use thiserror::Error;

/// Domain-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An enumerated value outside the accepted set
    #[error("Invalid {kind}: '{value}' (expected one of: {expected})")]
    InvalidValue {
        kind: &'static str,
        value: String,
        expected: String,
    },
}

impl DomainError {
    /// Create an invalid value error listing the accepted values
    pub fn invalid_value(kind: &'static str, value: impl Into<String>, expected: &[&str]) -> Self {
        DomainError::InvalidValue {
            kind,
            value: value.into(),
            expected: expected.join(", "),
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
