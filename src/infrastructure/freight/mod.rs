//! # Freight Vendor Adapters
//!
//! The [`FreightService`] port and its SOAP-backed implementation, plus the
//! wire types the vendor's JSON payloads deserialize into.

pub mod soap_service;
pub mod traits;
pub mod wire;

pub use soap_service::SoapFreightService;
pub use traits::FreightService;
pub use wire::{ChannelRecord, ErrorDetail, FeeRecord, ServiceReply};
