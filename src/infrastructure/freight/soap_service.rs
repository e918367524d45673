//! # SOAP Freight Service
//!
//! [`FreightService`] implementation backed by the vendor's `callService`
//! SOAP endpoint.
//!
//! This layer owns the two vendor operations the engine needs:
//! `getShippingMethod` for the channel catalogue and `getCalculateFee` for
//! pricing one channel. It also owns the vendor's business-failure
//! semantics: a reply that is well-formed but negative becomes an empty
//! listing or a declined quote, never an error.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::domain::entities::{Channel, FeeQuote, Shipment};
use crate::domain::value_objects::{
    CargoCategory, ChannelCode, CountryCode, Dimension, Fee, WarehouseCode,
};
use crate::infrastructure::freight::traits::FreightService;
use crate::infrastructure::freight::wire::{ChannelRecord, FeeRecord, ServiceReply};
use crate::infrastructure::soap::{GatewayResult, SoapGateway};

/// Vendor service that lists channels for a warehouse/country lane.
const LIST_CHANNELS: &str = "getShippingMethod";

/// Vendor service that prices one channel.
const QUOTE_FEE: &str = "getCalculateFee";

/// Tariff calculation type. `1` selects the standard parcel tariff.
const FEE_QUOTE_TYPE: u8 = 1;

/// Freight vendor adapter speaking the `callService` SOAP dialect.
#[derive(Debug)]
pub struct SoapFreightService {
    gateway: SoapGateway,
}

impl SoapFreightService {
    /// Creates the service on top of a configured gateway.
    #[must_use]
    pub fn new(gateway: SoapGateway) -> Self {
        Self { gateway }
    }

    fn channels_from_reply(reply: &ServiceReply) -> Vec<Channel> {
        reply
            .records()
            .iter()
            .filter_map(|value| serde_json::from_value::<ChannelRecord>(value.clone()).ok())
            .filter_map(|record| {
                let code = record.code?;
                let code = code.trim();
                if code.is_empty() {
                    return None;
                }
                let channel = Channel::from_code(ChannelCode::new(code));
                Some(match record.name {
                    Some(name) if !name.trim().is_empty() => channel.with_name(name),
                    _ => channel,
                })
            })
            .collect()
    }

    fn quote_from_record(channel: &Channel, record: &FeeRecord) -> Option<FeeQuote> {
        let amount = record.total()?;
        let total = match Fee::new(amount) {
            Ok(total) => total,
            Err(_) => {
                debug!(
                    channel = %channel.code(),
                    %amount,
                    "non-positive fee treated as a declined quote"
                );
                return None;
            }
        };

        // The tariff engine sometimes knows a nicer display name than the
        // catalogue; the requested code always wins.
        let quoted_channel = match record.sm_name_cn.as_deref() {
            Some(name) if !name.trim().is_empty() => channel.clone().with_name(name),
            _ => channel.clone(),
        };

        let mut quote = FeeQuote::new(quoted_channel, total);
        if let Some(processing) = record.processing_fee {
            quote = quote.with_processing_fee(processing);
        }
        if let Some(aging) = record.aging.as_deref() {
            if !aging.trim().is_empty() {
                quote = quote.with_delivery_estimate(aging);
            }
        }
        if let Some(currency) = record.currency.as_deref() {
            if !currency.trim().is_empty() {
                quote = quote.with_currency(currency);
            }
        }
        Some(quote)
    }
}

#[async_trait]
impl FreightService for SoapFreightService {
    async fn list_channels(
        &self,
        warehouse: &WarehouseCode,
        country: &CountryCode,
    ) -> GatewayResult<Vec<Channel>> {
        let params = ListChannelsParams {
            warehouse_code: warehouse.as_str(),
            country_code: country.as_str(),
        };
        let payload = self.gateway.call(LIST_CHANNELS, &params).await?;

        let reply: ServiceReply = match serde_json::from_value(payload) {
            Ok(reply) => reply,
            Err(error) => {
                debug!(%warehouse, %error, "channel listing reply had an unexpected shape");
                return Ok(Vec::new());
            }
        };
        if !reply.is_success() {
            debug!(
                %warehouse,
                reason = %reply.failure_reason(),
                "vendor declined channel listing"
            );
            return Ok(Vec::new());
        }

        Ok(Self::channels_from_reply(&reply))
    }

    async fn quote_fee(
        &self,
        warehouse: &WarehouseCode,
        country: &CountryCode,
        channel: &Channel,
        shipment: &Shipment,
    ) -> GatewayResult<Option<FeeQuote>> {
        let params = QuoteFeeParams::for_shipment(warehouse, country, channel, shipment);
        let payload = self.gateway.call(QUOTE_FEE, &params).await?;

        let reply: ServiceReply = match serde_json::from_value(payload) {
            Ok(reply) => reply,
            Err(error) => {
                debug!(
                    %warehouse,
                    channel = %channel.code(),
                    %error,
                    "fee reply had an unexpected shape"
                );
                return Ok(None);
            }
        };
        if !reply.is_success() {
            debug!(
                %warehouse,
                channel = %channel.code(),
                reason = %reply.failure_reason(),
                "channel declined to quote"
            );
            return Ok(None);
        }

        let record_value = match reply.first_record() {
            Some(value) => value,
            None => return Ok(None),
        };
        let record: FeeRecord = match serde_json::from_value(record_value.clone()) {
            Ok(record) => record,
            Err(error) => {
                debug!(
                    %warehouse,
                    channel = %channel.code(),
                    %error,
                    "fee record had an unexpected shape"
                );
                return Ok(None);
            }
        };

        Ok(Self::quote_from_record(channel, &record))
    }
}

/// Params document for `getShippingMethod`.
#[derive(Debug, Serialize)]
struct ListChannelsParams<'a> {
    warehouse_code: &'a str,
    country_code: &'a str,
}

/// Params document for `getCalculateFee`.
///
/// Weight goes out at three decimals and dimensions at one, with unmeasured
/// dimensions replaced by the vendor's one-centimetre billing floor.
#[derive(Debug, Serialize)]
struct QuoteFeeParams<'a> {
    warehouse_code: &'a str,
    country_code: &'a str,
    postcode: &'a str,
    shipping_method: &'a str,
    #[serde(rename = "type")]
    quote_type: u8,
    weight: Decimal,
    length: Decimal,
    width: Decimal,
    height: Decimal,
    pieces: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    contain_battery: Option<u8>,
}

impl<'a> QuoteFeeParams<'a> {
    fn for_shipment(
        warehouse: &'a WarehouseCode,
        country: &'a CountryCode,
        channel: &'a Channel,
        shipment: &'a Shipment,
    ) -> Self {
        Self {
            warehouse_code: warehouse.as_str(),
            country_code: country.as_str(),
            postcode: shipment.postcode().as_str(),
            shipping_method: channel.code().as_str(),
            quote_type: FEE_QUOTE_TYPE,
            weight: shipment.weight().wire_value(),
            length: shipment
                .length()
                .map_or_else(Dimension::min_wire, |d| d.wire_value()),
            width: shipment
                .width()
                .map_or_else(Dimension::min_wire, |d| d.wire_value()),
            height: shipment
                .height()
                .map_or_else(Dimension::min_wire, |d| d.wire_value()),
            pieces: shipment.pieces(),
            contain_battery: match shipment.cargo_category() {
                CargoCategory::General => None,
                category => Some(category.wire_code()),
            },
        }
    }
}
