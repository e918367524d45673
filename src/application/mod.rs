//! # Application Layer
//!
//! Use-case orchestration on top of the domain: rate shopping a shipment
//! across warehouses and selecting winners.

pub mod services;

pub use services::{
    QuoteStatus, QuoteSummary, RateShopConfig, RateShopEngine, RateShopReport, Warehouse,
    WarehouseQuote,
};
