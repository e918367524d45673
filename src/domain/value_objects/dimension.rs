//! # Dimension Value Object
//!
//! A single parcel dimension (length, width, or height) in centimetres.
//!
//! The vendor bills nothing below one centimetre and expects one decimal
//! place, so [`Dimension::wire_value`] rounds half away from zero to one
//! decimal and then clamps the result up to the `1.0` floor. A dimension the
//! caller never measured is sent as the floor value, which
//! [`Dimension::min_wire`] provides.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Decimal places the vendor expects on dimensions.
const WIRE_SCALE: u32 = 1;

/// Parcel dimension in centimetres. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dimension(Decimal);

impl Dimension {
    /// Creates a dimension from centimetres.
    ///
    /// Zero is accepted and means "not measured"; it is clamped to the
    /// billable floor when serialized for the vendor.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidDimension`] if the value is negative.
    pub fn from_cm(cm: Decimal) -> DomainResult<Self> {
        if cm < Decimal::ZERO {
            return Err(DomainError::invalid_dimension(format!(
                "dimension must not be negative, got {cm}"
            )));
        }
        Ok(Self(cm))
    }

    /// Returns the dimension in centimetres at its original scale.
    #[inline]
    #[must_use]
    pub fn cm(&self) -> Decimal {
        self.0
    }

    /// Returns the dimension rounded to one decimal place and clamped to the
    /// one-centimetre billing floor.
    #[must_use]
    pub fn wire_value(&self) -> Decimal {
        let mut wire = self
            .0
            .round_dp_with_strategy(WIRE_SCALE, RoundingStrategy::MidpointAwayFromZero);
        if wire < Decimal::ONE {
            wire = Decimal::ONE;
        }
        wire.rescale(WIRE_SCALE);
        wire
    }

    /// The wire form used when a dimension was never measured.
    #[must_use]
    pub fn min_wire() -> Decimal {
        // 1.0 with the same scale wire_value produces.
        Decimal::new(10, WIRE_SCALE)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}cm", self.0)
    }
}
