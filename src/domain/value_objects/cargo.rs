//! # Cargo Category
//!
//! Battery classification of the goods in a shipment.
//!
//! Carriers price battery cargo on different channels, so the vendor wants
//! to know whether a parcel is battery-free, contains batteries alongside
//! other goods, or is a pure battery shipment. The numeric wire codes are
//! fixed by the vendor's tariff engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Battery classification of a shipment's contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum CargoCategory {
    /// General cargo with no batteries.
    #[default]
    General = 0,
    /// Goods that contain batteries, e.g. electronics.
    ContainsBattery = 1,
    /// A shipment that is itself batteries.
    PureBattery = 2,
}

impl CargoCategory {
    /// Returns the numeric code the vendor expects on the wire.
    #[inline]
    #[must_use]
    pub const fn wire_code(&self) -> u8 {
        *self as u8
    }

    /// Returns `true` when the shipment involves batteries in any form.
    #[inline]
    #[must_use]
    pub const fn has_battery(&self) -> bool {
        matches!(self, Self::ContainsBattery | Self::PureBattery)
    }

    /// Looks up a category from its vendor wire code.
    #[must_use]
    pub const fn from_wire_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::General),
            1 => Some(Self::ContainsBattery),
            2 => Some(Self::PureBattery),
            _ => None,
        }
    }
}

impl fmt::Display for CargoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::General => "GENERAL",
            Self::ContainsBattery => "CONTAINS_BATTERY",
            Self::PureBattery => "PURE_BATTERY",
        };
        write!(f, "{label}")
    }
}

/// Error returned when parsing a [`CargoCategory`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cargo category: '{0}'")]
pub struct ParseCargoCategoryError(String);

impl FromStr for CargoCategory {
    type Err = ParseCargoCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GENERAL" => Ok(Self::General),
            "CONTAINS_BATTERY" => Ok(Self::ContainsBattery),
            "PURE_BATTERY" => Ok(Self::PureBattery),
            _ => Err(ParseCargoCategoryError(s.to_string())),
        }
    }
}
