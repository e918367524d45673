//! # Domain Entities
//!
//! Core business objects of the rate-shopping domain.
//!
//! - [`Shipment`]: the parcel being priced, destination-scoped
//! - [`Channel`]: a shipping channel offered by the freight vendor
//! - [`FeeQuote`]: a successful price from one channel

pub mod channel;
pub mod fee_quote;
pub mod shipment;

pub use channel::Channel;
pub use fee_quote::FeeQuote;
pub use shipment::{Shipment, ShipmentBuilder};
