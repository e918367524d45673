//! # Freight Service Trait
//!
//! Port through which the application layer talks to a freight vendor.
//!
//! The production implementation is [`SoapFreightService`]; tests swap in
//! in-memory fakes.
//!
//! [`SoapFreightService`]: crate::infrastructure::freight::SoapFreightService

use std::fmt;

use async_trait::async_trait;

use crate::domain::entities::{Channel, FeeQuote, Shipment};
use crate::domain::value_objects::{CountryCode, WarehouseCode};
use crate::infrastructure::soap::GatewayResult;

/// A freight vendor that can list channels and price shipments.
///
/// Both operations distinguish vendor refusals from infrastructure
/// failures: a vendor that answers "nothing available" yields an empty
/// `Ok`, while a vendor that cannot be reached yields an `Err`.
#[async_trait]
pub trait FreightService: Send + Sync + fmt::Debug {
    /// Lists the channels serving a warehouse and destination country.
    ///
    /// Returns an empty list when the vendor has no channel for the lane or
    /// declines the request at the business level.
    ///
    /// # Errors
    ///
    /// Returns a gateway error when the vendor cannot be reached or its
    /// reply cannot be decoded.
    async fn list_channels(
        &self,
        warehouse: &WarehouseCode,
        country: &CountryCode,
    ) -> GatewayResult<Vec<Channel>>;

    /// Prices a shipment on one channel.
    ///
    /// Returns `Ok(None)` when the channel declines to quote, which covers
    /// unsupported lanes, out-of-range weights, and zero-priced replies.
    ///
    /// # Errors
    ///
    /// Returns a gateway error when the vendor cannot be reached or its
    /// reply cannot be decoded.
    async fn quote_fee(
        &self,
        warehouse: &WarehouseCode,
        country: &CountryCode,
        channel: &Channel,
        shipment: &Shipment,
    ) -> GatewayResult<Option<FeeQuote>>;
}
