//! # Channel Entity
//!
//! A shipping channel (transport product) offered by the freight vendor for
//! a warehouse and destination country pair.
//!
//! Channels come back from the vendor's catalogue with a short code such as
//! `E-USPS` and usually a human-readable name. Listings without a name fall
//! back to the code, so a channel can always be displayed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ChannelCode;

/// A shipping channel offered by the vendor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Channel {
    code: ChannelCode,
    name: String,
}

impl Channel {
    /// Creates a channel with an explicit display name.
    #[must_use]
    pub fn new(code: ChannelCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }

    /// Creates a channel whose display name is its code.
    #[must_use]
    pub fn from_code(code: ChannelCode) -> Self {
        let name = code.as_str().to_string();
        Self { code, name }
    }

    // ========== Accessors ==========

    /// Returns the vendor's channel code.
    #[inline]
    #[must_use]
    pub fn code(&self) -> &ChannelCode {
        &self.code
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a copy with the display name replaced.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == self.code.as_str() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} ({})", self.code, self.name)
        }
    }
}
