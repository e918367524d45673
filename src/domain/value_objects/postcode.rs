//! # Postcode Value Object
//!
//! Destination postal code for a shipment.
//!
//! Vendors and upstream callers are sloppy about this field: it arrives
//! sometimes as a string (`"90210"`), sometimes as a bare integer (`90210`),
//! and occasionally padded with whitespace. [`Postcode`] normalizes all of
//! those into a trimmed string and leaves format validation to the carrier,
//! since postal formats vary wildly between destination countries.
//!
//! # Examples
//!
//! ```
//! use freight_rfq::domain::value_objects::Postcode;
//!
//! let from_str = Postcode::new("  90210 ");
//! let from_num = Postcode::from(90210u32);
//! assert_eq!(from_str, from_num);
//! assert_eq!(from_str.as_str(), "90210");
//! ```

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Trimmed destination postal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Postcode(String);

impl Postcode {
    /// Creates a postcode, trimming surrounding whitespace.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    /// Returns the postcode as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when no postcode was supplied.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Postcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Postcode {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<u32> for Postcode {
    fn from(raw: u32) -> Self {
        Self(raw.to_string())
    }
}

impl<'de> Deserialize<'de> for Postcode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PostcodeVisitor;

        impl Visitor<'_> for PostcodeVisitor {
            type Value = Postcode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a postal code as a string or an integer")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Postcode::new(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Postcode(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Postcode(value.to_string()))
            }
        }

        deserializer.deserialize_any(PostcodeVisitor)
    }
}
