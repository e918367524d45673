//! # Fee Value Object
//!
//! A quoted shipping fee in the vendor's billing currency.
//!
//! Fees are strictly positive: the vendor signals "cannot serve this lane"
//! with zero or missing amounts, and those replies are treated as declined
//! quotes rather than free shipping.
//!
//! # Examples
//!
//! ```
//! use freight_rfq::domain::value_objects::Fee;
//! use rust_decimal_macros::dec;
//!
//! let cheap = Fee::new(dec!(65.30))?;
//! let pricey = Fee::new(dec!(78.50))?;
//! assert!(cheap < pricey);
//! # Ok::<(), freight_rfq::domain::errors::DomainError>(())
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Strictly positive monetary fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fee(Decimal);

impl Fee {
    /// Creates a fee from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidFee`] if the amount is zero or negative.
    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::invalid_fee(format!(
                "fee must be positive, got {amount}"
            )));
        }
        Ok(Self(amount))
    }

    /// Returns the fee amount.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
