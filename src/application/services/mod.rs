//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! This module provides application-level services including:
//! - [`RateShopEngine`]: Concurrent fee quoting across warehouses and channels
//! - [`selection`]: Cheapest-quote selection

pub mod rate_shop;
pub mod selection;

pub use rate_shop::{
    QuoteStatus, QuoteSummary, RateShopConfig, RateShopEngine, RateShopReport, Warehouse,
    WarehouseQuote,
};
pub use selection::cheapest;
