//! # Weight Value Object
//!
//! Chargeable parcel weight in kilograms.
//!
//! The vendor's tariff engine expects weights with exactly three decimal
//! places, so [`Weight::wire_value`] rounds half away from zero and pads the
//! scale: `2.5` kg goes over the wire as `2.500`, and `1.23456` as `1.235`.
//!
//! # Examples
//!
//! ```
//! use freight_rfq::domain::value_objects::Weight;
//! use rust_decimal::Decimal;
//!
//! let weight = Weight::from_kg(Decimal::new(25, 1))?;
//! assert_eq!(weight.wire_value().to_string(), "2.500");
//! # Ok::<(), freight_rfq::domain::errors::DomainError>(())
//! ```

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Decimal places the vendor expects on weights.
const WIRE_SCALE: u32 = 3;

/// Parcel weight in kilograms. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(Decimal);

impl Weight {
    /// Creates a weight from kilograms.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidWeight`] if the value is zero or
    /// negative.
    pub fn from_kg(kg: Decimal) -> DomainResult<Self> {
        if kg <= Decimal::ZERO {
            return Err(DomainError::invalid_weight(format!(
                "weight must be positive, got {kg}"
            )));
        }
        Ok(Self(kg))
    }

    /// Returns the weight in kilograms at its original scale.
    #[inline]
    #[must_use]
    pub fn kg(&self) -> Decimal {
        self.0
    }

    /// Returns the weight rounded and padded to three decimal places, the
    /// form the tariff engine expects.
    #[must_use]
    pub fn wire_value(&self) -> Decimal {
        let mut wire = self
            .0
            .round_dp_with_strategy(WIRE_SCALE, RoundingStrategy::MidpointAwayFromZero);
        wire.rescale(WIRE_SCALE);
        wire
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}kg", self.0)
    }
}
