//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`QuoteRequestId`]: UUID-based quote request identifier
//! - [`WarehouseCode`], [`ChannelCode`], [`CountryCode`]: String-based vendor codes
//!
//! ## Shipment Measurements
//!
//! - [`Postcode`]: Normalized destination postal code
//! - [`Weight`]: Kilograms, serialized at the vendor's three-decimal scale
//! - [`Dimension`]: Centimetres, clamped to the vendor's billing floor
//!
//! ## Money and Classification
//!
//! - [`Fee`]: Strictly positive monetary amount
//! - [`CargoCategory`]: Battery classification with fixed wire codes

pub mod cargo;
pub mod dimension;
pub mod fee;
pub mod ids;
pub mod postcode;
pub mod weight;

pub use cargo::{CargoCategory, ParseCargoCategoryError};
pub use dimension::Dimension;
pub use fee::Fee;
pub use ids::{ChannelCode, CountryCode, QuoteRequestId, WarehouseCode};
pub use postcode::Postcode;
pub use weight::Weight;
