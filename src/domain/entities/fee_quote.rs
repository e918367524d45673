//! # Fee Quote Entity
//!
//! A successful price returned by one shipping channel for one shipment.
//!
//! The total is the only guaranteed figure. Vendors optionally break out a
//! processing surcharge and attach a delivery estimate ("aging" in their
//! vocabulary, e.g. `7-12` working days), so those ride along when present.
//!
//! # Examples
//!
//! ```
//! use freight_rfq::domain::entities::{Channel, FeeQuote};
//! use freight_rfq::domain::value_objects::{ChannelCode, Fee};
//! use rust_decimal_macros::dec;
//!
//! let channel = Channel::from_code(ChannelCode::new("E-USPS"));
//! let quote = FeeQuote::new(channel, Fee::new(dec!(65.30))?)
//!     .with_processing_fee(dec!(5.30))
//!     .with_delivery_estimate("7-12");
//! assert_eq!(quote.freight_portion(), dec!(60.00));
//! # Ok::<(), freight_rfq::domain::errors::DomainError>(())
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entities::Channel;
use crate::domain::value_objects::Fee;

/// A priced offer from a single shipping channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    channel: Channel,
    total: Fee,
    processing_fee: Option<Decimal>,
    delivery_estimate: Option<String>,
    currency: Option<String>,
    quoted_at: DateTime<Utc>,
}

impl FeeQuote {
    /// Creates a quote with the mandatory channel and total.
    #[must_use]
    pub fn new(channel: Channel, total: Fee) -> Self {
        Self {
            channel,
            total,
            processing_fee: None,
            delivery_estimate: None,
            currency: None,
            quoted_at: Utc::now(),
        }
    }

    /// Attaches the vendor's processing surcharge.
    #[must_use]
    pub fn with_processing_fee(mut self, processing_fee: Decimal) -> Self {
        self.processing_fee = Some(processing_fee);
        self
    }

    /// Attaches the vendor's delivery estimate, e.g. `7-12` working days.
    #[must_use]
    pub fn with_delivery_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.delivery_estimate = Some(estimate.into());
        self
    }

    /// Attaches the billing currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    // ========== Accessors ==========

    /// Returns the quoting channel.
    #[inline]
    #[must_use]
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Returns the total fee.
    #[inline]
    #[must_use]
    pub fn total(&self) -> Fee {
        self.total
    }

    /// Returns the processing surcharge, if the vendor broke it out.
    #[inline]
    #[must_use]
    pub fn processing_fee(&self) -> Option<Decimal> {
        self.processing_fee
    }

    /// Returns the delivery estimate, if the vendor supplied one.
    #[inline]
    #[must_use]
    pub fn delivery_estimate(&self) -> Option<&str> {
        self.delivery_estimate.as_deref()
    }

    /// Returns the billing currency, if the vendor supplied one.
    #[inline]
    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Returns when the quote was taken.
    #[inline]
    #[must_use]
    pub fn quoted_at(&self) -> DateTime<Utc> {
        self.quoted_at
    }

    /// Returns the freight portion of the total.
    ///
    /// When the vendor broke out a processing surcharge this is the total
    /// minus that surcharge, floored at zero. Otherwise the whole total is
    /// freight.
    #[must_use]
    pub fn freight_portion(&self) -> Decimal {
        match self.processing_fee {
            Some(processing) => self
                .total
                .amount()
                .saturating_sub(processing)
                .max(Decimal::ZERO),
            None => self.total.amount(),
        }
    }
}

impl fmt::Display for FeeQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} via {}", self.total, self.channel)
    }
}
