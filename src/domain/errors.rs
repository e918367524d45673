//! # Domain Errors
//!
//! Error types for domain validation failures.
//!
//! These errors are raised when constructing value objects or entities from
//! values that violate domain invariants, such as a non-positive fee or a
//! negative parcel weight.
//!
//! # Examples
//!
//! ```
//! use freight_rfq::domain::errors::DomainError;
//! use freight_rfq::domain::value_objects::Fee;
//! use rust_decimal::Decimal;
//!
//! let result = Fee::new(Decimal::ZERO);
//! assert!(matches!(result, Err(DomainError::InvalidFee(_))));
//! ```

use thiserror::Error;

/// Error type for domain validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Fee is not a positive amount.
    #[error("invalid fee: {0}")]
    InvalidFee(String),

    /// Weight is not a positive amount.
    #[error("invalid weight: {0}")]
    InvalidWeight(String),

    /// Dimension is negative.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// Generic validation failure.
    #[error("validation error: {0}")]
    Validation(String),
}

impl DomainError {
    /// Creates an invalid fee error.
    #[must_use]
    pub fn invalid_fee(message: impl Into<String>) -> Self {
        Self::InvalidFee(message.into())
    }

    /// Creates an invalid weight error.
    #[must_use]
    pub fn invalid_weight(message: impl Into<String>) -> Self {
        Self::InvalidWeight(message.into())
    }

    /// Creates an invalid dimension error.
    #[must_use]
    pub fn invalid_dimension(message: impl Into<String>) -> Self {
        Self::InvalidDimension(message.into())
    }

    /// Creates a generic validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
