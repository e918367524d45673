//! # freight-rfq
//!
//! Shipping-fee RFQ engine: quotes every channel of a freight vendor over
//! its SOAP API and keeps the cheapest offer per warehouse.
//!
//! The vendor exposes one `callService` SOAP operation that smuggles JSON
//! in both directions. On top of that wire, this crate lists the shipping
//! channels available from each configured warehouse to a destination
//! country, prices a shipment on every channel concurrently, and reports
//! the cheapest channel per warehouse so fulfilment can pick the cheapest
//! warehouse overall.
//!
//! ## Architecture
//!
//! - [`domain`]: entities and value objects (shipments, channels, fees)
//! - [`application`]: the rate-shop engine and quote selection
//! - [`infrastructure`]: SOAP transport and the freight vendor adapter
//! - [`config`]: settings loading and validation
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use freight_rfq::application::RateShopEngine;
//! use freight_rfq::config::Settings;
//! use freight_rfq::domain::entities::Shipment;
//! use freight_rfq::domain::value_objects::{Postcode, Weight};
//! use freight_rfq::infrastructure::freight::SoapFreightService;
//! use freight_rfq::infrastructure::soap::SoapGateway;
//! use rust_decimal_macros::dec;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load()?;
//! let gateway = SoapGateway::new(&settings.gateway)?;
//! let service = Arc::new(SoapFreightService::new(gateway));
//! let engine = RateShopEngine::new(service, settings.rate_shop_config());
//!
//! let shipment = Shipment::builder(Postcode::new("90210"), Weight::from_kg(dec!(2.5))?).build();
//! let report = engine.shop(&shipment).await;
//!
//! for result in report.results() {
//!     println!("{result}");
//! }
//! if let (Some(best), Some(saving)) = (report.best(), report.savings()) {
//!     println!("cheapest from {}, saving {saving}", best.warehouse());
//! }
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
