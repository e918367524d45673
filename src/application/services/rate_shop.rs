//! # Rate Shop Engine
//!
//! Prices a shipment from every configured warehouse and keeps the cheapest
//! channel per warehouse.
//!
//! For each warehouse the engine lists the channels serving the destination
//! country, fans quoting out across them concurrently, and selects the
//! lowest total. Warehouses run independently: a vendor outage on one lane
//! degrades that lane's result to a failure status and never aborts the
//! others. The run as a whole is therefore infallible and always returns a
//! [`RateShopReport`] with one entry per configured warehouse.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::application::services::selection;
use crate::domain::entities::{FeeQuote, Shipment};
use crate::domain::value_objects::{ChannelCode, CountryCode, WarehouseCode};
use crate::infrastructure::freight::FreightService;

/// Default cap on how long a single channel may take to quote.
const DEFAULT_PER_CHANNEL_TIMEOUT_MS: u64 = 10_000;

/// One warehouse in the roster: the vendor code plus an optional display
/// label carried into results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warehouse {
    code: WarehouseCode,
    label: Option<String>,
}

impl Warehouse {
    /// Creates an unlabeled roster entry.
    #[must_use]
    pub fn new(code: WarehouseCode) -> Self {
        Self { code, label: None }
    }

    /// Attaches a display label, e.g. `US East`.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the vendor warehouse code.
    #[inline]
    #[must_use]
    pub fn code(&self) -> &WarehouseCode {
        &self.code
    }

    /// Returns the display label, if one is configured.
    #[inline]
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the label when configured, the code otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or_else(|| self.code.as_str())
    }
}

/// Configuration for [`RateShopEngine`].
#[derive(Debug, Clone)]
pub struct RateShopConfig {
    /// Destination country for channel listing and pricing.
    pub country: CountryCode,
    /// Warehouses to price from, in display order.
    pub warehouses: Vec<Warehouse>,
    /// Budget for one channel's quote, in milliseconds.
    pub per_channel_timeout_ms: u64,
    /// Cap on how many listed channels are priced per warehouse.
    pub max_channels: Option<usize>,
}

impl RateShopConfig {
    /// Creates a config with default timeout and no channel cap.
    #[must_use]
    pub fn new(country: CountryCode, warehouses: Vec<Warehouse>) -> Self {
        Self {
            country,
            warehouses,
            per_channel_timeout_ms: DEFAULT_PER_CHANNEL_TIMEOUT_MS,
            max_channels: None,
        }
    }

    /// Sets the per-channel quote budget.
    #[must_use]
    pub fn with_per_channel_timeout(mut self, timeout_ms: u64) -> Self {
        self.per_channel_timeout_ms = timeout_ms;
        self
    }

    /// Caps how many listed channels are priced per warehouse.
    #[must_use]
    pub fn with_max_channels(mut self, max_channels: usize) -> Self {
        self.max_channels = Some(max_channels);
        self
    }

    /// Returns the configured label for a warehouse, if any.
    #[must_use]
    pub fn label_for(&self, warehouse: &WarehouseCode) -> Option<String> {
        self.warehouses
            .iter()
            .find(|entry| entry.code() == warehouse)
            .and_then(|entry| entry.label.clone())
    }
}

/// Outcome class of one warehouse's run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    /// At least one channel priced the shipment.
    Quoted,
    /// The vendor listed no channel for the lane.
    NoChannels,
    /// Channels exist but none produced a price.
    AllChannelsFailed,
    /// The channel listing itself could not be fetched.
    ListingFailed,
}

impl QuoteStatus {
    /// Returns `true` when the warehouse produced a price.
    #[inline]
    #[must_use]
    pub const fn is_quoted(&self) -> bool {
        matches!(self, Self::Quoted)
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Quoted => "quoted",
            Self::NoChannels => "no available channels",
            Self::AllChannelsFailed => "all channels failed quoting",
            Self::ListingFailed => "channel listing failed",
        };
        write!(f, "{label}")
    }
}

/// One warehouse's result: the winning quote, or why there is none.
#[derive(Debug, Clone, Serialize)]
pub struct WarehouseQuote {
    warehouse: WarehouseCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    status: QuoteStatus,
    best: Option<FeeQuote>,
    channels_listed: usize,
    quotes_collected: usize,
    channels_failed: usize,
    detail: Option<String>,
}

impl WarehouseQuote {
    fn no_channels(warehouse: WarehouseCode) -> Self {
        Self {
            warehouse,
            label: None,
            status: QuoteStatus::NoChannels,
            best: None,
            channels_listed: 0,
            quotes_collected: 0,
            channels_failed: 0,
            detail: None,
        }
    }

    fn listing_failed(warehouse: WarehouseCode, error: String) -> Self {
        Self {
            warehouse,
            label: None,
            status: QuoteStatus::ListingFailed,
            best: None,
            channels_listed: 0,
            quotes_collected: 0,
            channels_failed: 0,
            detail: Some(error),
        }
    }

    fn from_outcome(
        warehouse: WarehouseCode,
        channels_listed: usize,
        quotes: Vec<FeeQuote>,
        failures: Vec<String>,
    ) -> Self {
        let quotes_collected = quotes.len();
        let channels_failed = failures.len();
        let detail = if failures.is_empty() {
            None
        } else {
            Some(failures.join("; "))
        };

        match selection::cheapest(&quotes) {
            Some(best) => Self {
                warehouse,
                label: None,
                status: QuoteStatus::Quoted,
                best: Some(best.clone()),
                channels_listed,
                quotes_collected,
                channels_failed,
                detail,
            },
            None => Self {
                warehouse,
                label: None,
                status: QuoteStatus::AllChannelsFailed,
                best: None,
                channels_listed,
                quotes_collected,
                channels_failed,
                detail,
            },
        }
    }

    fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    // ========== Accessors ==========

    /// Returns the warehouse this result belongs to.
    #[inline]
    #[must_use]
    pub fn warehouse(&self) -> &WarehouseCode {
        &self.warehouse
    }

    /// Returns the configured display label, if any.
    #[inline]
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the label when configured, the warehouse code otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.label
            .as_deref()
            .unwrap_or_else(|| self.warehouse.as_str())
    }

    /// Returns the outcome class.
    #[inline]
    #[must_use]
    pub fn status(&self) -> QuoteStatus {
        self.status
    }

    /// Returns the winning quote, if any channel priced the shipment.
    #[inline]
    #[must_use]
    pub fn best(&self) -> Option<&FeeQuote> {
        self.best.as_ref()
    }

    /// Returns the winning fee amount.
    #[inline]
    #[must_use]
    pub fn fee(&self) -> Option<Decimal> {
        self.best.as_ref().map(|quote| quote.total().amount())
    }

    /// Returns the winning channel code.
    #[inline]
    #[must_use]
    pub fn channel(&self) -> Option<&ChannelCode> {
        self.best.as_ref().map(|quote| quote.channel().code())
    }

    /// Number of channels quoting was attempted on, after any
    /// `max_channels` cap.
    #[inline]
    #[must_use]
    pub fn channels_listed(&self) -> usize {
        self.channels_listed
    }

    /// Number of channels that returned a price.
    #[inline]
    #[must_use]
    pub fn quotes_collected(&self) -> usize {
        self.quotes_collected
    }

    /// Number of channels that errored or timed out. Declines count as
    /// neither collected nor failed.
    #[inline]
    #[must_use]
    pub fn channels_failed(&self) -> usize {
        self.channels_failed
    }

    /// Returns failure diagnostics, joined per channel.
    #[inline]
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns `true` when this warehouse produced a price.
    #[inline]
    #[must_use]
    pub fn has_quote(&self) -> bool {
        self.best.is_some()
    }

    /// Collapses the result into the flat consumer shape.
    #[must_use]
    pub fn summary(&self) -> QuoteSummary {
        QuoteSummary {
            warehouse: self.warehouse.clone(),
            label: self.label.clone(),
            fee: self.fee(),
            channel: self.channel().cloned(),
            status: self.status.to_string(),
        }
    }
}

impl fmt::Display for WarehouseQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} ({label})", self.warehouse)?,
            None => write!(f, "{}", self.warehouse)?,
        }
        match &self.best {
            Some(quote) => write!(f, ": {quote}"),
            None => write!(f, ": {}", self.status),
        }
    }
}

/// Flat per-warehouse shape for downstream consumers: the fee and channel
/// when quoting succeeded, both `null` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteSummary {
    /// Warehouse the summary belongs to.
    pub warehouse: WarehouseCode,
    /// Configured display label, omitted when none is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Winning fee amount, absent when the warehouse has no quote.
    pub fee: Option<Decimal>,
    /// Winning channel code, absent when the warehouse has no quote.
    pub channel: Option<ChannelCode>,
    /// Human-readable outcome, e.g. `quoted` or `no available channels`.
    pub status: String,
}

/// Results of one rate-shop run, one entry per configured warehouse in
/// configuration order.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RateShopReport {
    results: Vec<WarehouseQuote>,
}

impl RateShopReport {
    fn new(results: Vec<WarehouseQuote>) -> Self {
        Self { results }
    }

    /// Returns all per-warehouse results.
    #[inline]
    #[must_use]
    pub fn results(&self) -> &[WarehouseQuote] {
        &self.results
    }

    /// Looks up the result for one warehouse.
    #[must_use]
    pub fn for_warehouse(&self, warehouse: &WarehouseCode) -> Option<&WarehouseQuote> {
        self.results
            .iter()
            .find(|result| result.warehouse() == warehouse)
    }

    /// Returns the warehouse with the lowest winning fee.
    ///
    /// Ties keep the warehouse that comes first in configuration order.
    #[must_use]
    pub fn best(&self) -> Option<&WarehouseQuote> {
        self.results.iter().fold(None, |best, candidate| {
            match (candidate.fee(), best.and_then(WarehouseQuote::fee)) {
                (None, _) => best,
                (Some(_), None) => Some(candidate),
                (Some(fee), Some(current)) if fee < current => Some(candidate),
                _ => best,
            }
        })
    }

    /// Number of warehouses that produced a price.
    #[must_use]
    pub fn quoted_count(&self) -> usize {
        self.results.iter().filter(|result| result.has_quote()).count()
    }

    /// Difference between the two cheapest warehouse fees.
    ///
    /// `None` until at least two warehouses have quotes to compare.
    #[must_use]
    pub fn savings(&self) -> Option<Decimal> {
        let mut fees: Vec<Decimal> = self.results.iter().filter_map(WarehouseQuote::fee).collect();
        fees.sort_unstable();
        match (fees.first(), fees.get(1)) {
            (Some(cheapest), Some(runner_up)) => runner_up.checked_sub(*cheapest),
            _ => None,
        }
    }

    /// Collapses every result into the flat consumer shape.
    #[must_use]
    pub fn summaries(&self) -> Vec<QuoteSummary> {
        self.results.iter().map(WarehouseQuote::summary).collect()
    }
}

/// Prices shipments across warehouses and channels.
#[derive(Debug, Clone)]
pub struct RateShopEngine {
    service: Arc<dyn FreightService>,
    config: RateShopConfig,
}

impl RateShopEngine {
    /// Creates an engine over a freight service.
    #[must_use]
    pub fn new(service: Arc<dyn FreightService>, config: RateShopConfig) -> Self {
        Self { service, config }
    }

    /// Returns the engine configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RateShopConfig {
        &self.config
    }

    /// Prices a shipment from every configured warehouse.
    ///
    /// Never fails: a warehouse whose vendor calls go wrong contributes a
    /// failure-status entry instead of an error.
    pub async fn shop(&self, shipment: &Shipment) -> RateShopReport {
        info!(
            shipment = %shipment.id(),
            warehouses = self.config.warehouses.len(),
            "rate shopping across warehouses"
        );

        let runs = self
            .config
            .warehouses
            .iter()
            .map(|entry| self.cheapest_fee(entry.code(), shipment));
        let report = RateShopReport::new(join_all(runs).await);

        info!(
            quoted = report.quoted_count(),
            warehouses = report.results().len(),
            "rate shop run complete"
        );
        report
    }

    /// Prices a shipment from one warehouse: lists channels, quotes them
    /// concurrently, and keeps the cheapest.
    pub async fn cheapest_fee(
        &self,
        warehouse: &WarehouseCode,
        shipment: &Shipment,
    ) -> WarehouseQuote {
        let label = self.config.label_for(warehouse);
        let mut channels = match self
            .service
            .list_channels(warehouse, &self.config.country)
            .await
        {
            Ok(channels) => channels,
            Err(error) => {
                warn!(%warehouse, %error, "channel listing failed");
                return WarehouseQuote::listing_failed(warehouse.clone(), error.to_string())
                    .with_label(label);
            }
        };

        if channels.is_empty() {
            debug!(%warehouse, "no channels serve this lane");
            return WarehouseQuote::no_channels(warehouse.clone()).with_label(label);
        }
        if let Some(cap) = self.config.max_channels {
            channels.truncate(cap);
        }
        let channels_listed = channels.len();

        let per_channel_timeout = Duration::from_millis(self.config.per_channel_timeout_ms);
        let mut handles = Vec::with_capacity(channels.len());
        for channel in channels {
            let service = Arc::clone(&self.service);
            let warehouse = warehouse.clone();
            let country = self.config.country.clone();
            let shipment = shipment.clone();
            handles.push(tokio::spawn(async move {
                let code = channel.code().clone();
                let outcome = tokio::time::timeout(
                    per_channel_timeout,
                    service.quote_fee(&warehouse, &country, &channel, &shipment),
                )
                .await;
                (code, outcome)
            }));
        }

        let mut quotes = Vec::new();
        let mut failures = Vec::new();
        for handle in handles {
            match handle.await {
                Ok((_, Ok(Ok(Some(quote))))) => quotes.push(quote),
                Ok((code, Ok(Ok(None)))) => {
                    debug!(%warehouse, channel = %code, "channel declined to quote");
                }
                Ok((code, Ok(Err(error)))) => {
                    warn!(%warehouse, channel = %code, %error, "channel quoting failed");
                    failures.push(format!("{code}: {error}"));
                }
                Ok((code, Err(_))) => {
                    warn!(
                        %warehouse,
                        channel = %code,
                        timeout_ms = self.config.per_channel_timeout_ms,
                        "channel quoting timed out"
                    );
                    failures.push(format!(
                        "{code}: timed out after {}ms",
                        self.config.per_channel_timeout_ms
                    ));
                }
                Err(error) => {
                    warn!(%warehouse, %error, "quoting task failed");
                    failures.push(format!("task failed: {error}"));
                }
            }
        }

        WarehouseQuote::from_outcome(warehouse.clone(), channels_listed, quotes, failures)
            .with_label(label)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::Channel;
    use crate::domain::value_objects::{Fee, Postcode, Weight};
    use crate::infrastructure::soap::GatewayError;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone)]
    enum QuoteBehavior {
        Fee(Decimal),
        Declined,
        Fail(String),
        Slow { delay_ms: u64, amount: Decimal },
    }

    #[derive(Debug, Default)]
    struct MockFreightService {
        channels: HashMap<String, Vec<Channel>>,
        listing_errors: HashMap<String, GatewayError>,
        behaviors: HashMap<(String, String), QuoteBehavior>,
        quote_calls: AtomicUsize,
    }

    impl MockFreightService {
        fn new() -> Self {
            Self::default()
        }

        fn with_channels(mut self, warehouse: &str, codes: &[&str]) -> Self {
            let channels = codes
                .iter()
                .map(|code| Channel::from_code(ChannelCode::new(*code)))
                .collect();
            self.channels.insert(warehouse.to_string(), channels);
            self
        }

        fn with_listing_error(mut self, warehouse: &str, error: GatewayError) -> Self {
            self.listing_errors.insert(warehouse.to_string(), error);
            self
        }

        fn with_quote(mut self, warehouse: &str, channel: &str, behavior: QuoteBehavior) -> Self {
            self.behaviors
                .insert((warehouse.to_string(), channel.to_string()), behavior);
            self
        }

        fn quote_calls(&self) -> usize {
            self.quote_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FreightService for MockFreightService {
        async fn list_channels(
            &self,
            warehouse: &WarehouseCode,
            _country: &CountryCode,
        ) -> crate::infrastructure::soap::GatewayResult<Vec<Channel>> {
            if let Some(error) = self.listing_errors.get(warehouse.as_str()) {
                return Err(error.clone());
            }
            Ok(self
                .channels
                .get(warehouse.as_str())
                .cloned()
                .unwrap_or_default())
        }

        async fn quote_fee(
            &self,
            warehouse: &WarehouseCode,
            _country: &CountryCode,
            channel: &Channel,
            _shipment: &Shipment,
        ) -> crate::infrastructure::soap::GatewayResult<Option<FeeQuote>> {
            self.quote_calls.fetch_add(1, Ordering::SeqCst);
            let key = (
                warehouse.as_str().to_string(),
                channel.code().as_str().to_string(),
            );
            match self.behaviors.get(&key) {
                Some(QuoteBehavior::Fee(amount)) => Ok(Some(FeeQuote::new(
                    channel.clone(),
                    Fee::new(*amount).unwrap(),
                ))),
                Some(QuoteBehavior::Declined) | None => Ok(None),
                Some(QuoteBehavior::Fail(message)) => {
                    Err(GatewayError::transport(message.clone()))
                }
                Some(QuoteBehavior::Slow { delay_ms, amount }) => {
                    tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                    Ok(Some(FeeQuote::new(
                        channel.clone(),
                        Fee::new(*amount).unwrap(),
                    )))
                }
            }
        }
    }

    fn shipment() -> Shipment {
        Shipment::builder(Postcode::new("90210"), Weight::from_kg(dec!(2.5)).unwrap()).build()
    }

    fn config_for(warehouses: &[&str]) -> RateShopConfig {
        RateShopConfig::new(
            CountryCode::new("US"),
            warehouses
                .iter()
                .map(|w| Warehouse::new(WarehouseCode::new(*w)))
                .collect(),
        )
    }

    fn engine(mock: Arc<MockFreightService>, config: RateShopConfig) -> RateShopEngine {
        RateShopEngine::new(mock, config)
    }

    mod single_warehouse {
        use super::*;

        #[tokio::test]
        async fn picks_the_cheapest_channel() {
            let mock = Arc::new(
                MockFreightService::new()
                    .with_channels("USEA", &["A", "B", "C"])
                    .with_quote("USEA", "A", QuoteBehavior::Fee(dec!(78.50)))
                    .with_quote("USEA", "B", QuoteBehavior::Fee(dec!(65.30)))
                    .with_quote("USEA", "C", QuoteBehavior::Fee(dec!(70.00))),
            );
            let engine = engine(mock, config_for(&["USEA"]));

            let result = engine
                .cheapest_fee(&WarehouseCode::new("USEA"), &shipment())
                .await;

            assert_eq!(result.status(), QuoteStatus::Quoted);
            assert_eq!(result.fee(), Some(dec!(65.30)));
            assert_eq!(result.channel().unwrap().as_str(), "B");
            assert_eq!(result.channels_listed(), 3);
            assert_eq!(result.quotes_collected(), 3);
            assert_eq!(result.channels_failed(), 0);
        }

        #[tokio::test]
        async fn tie_keeps_the_first_listed_channel() {
            let mock = Arc::new(
                MockFreightService::new()
                    .with_channels("USEA", &["A", "B"])
                    .with_quote("USEA", "A", QuoteBehavior::Fee(dec!(65.30)))
                    .with_quote("USEA", "B", QuoteBehavior::Fee(dec!(65.30))),
            );
            let engine = engine(mock, config_for(&["USEA"]));

            let result = engine
                .cheapest_fee(&WarehouseCode::new("USEA"), &shipment())
                .await;

            assert_eq!(result.channel().unwrap().as_str(), "A");
        }

        #[tokio::test]
        async fn empty_listing_short_circuits_quoting() {
            let mock = Arc::new(MockFreightService::new().with_channels("USEA", &[]));
            let engine = engine(Arc::clone(&mock), config_for(&["USEA"]));

            let result = engine
                .cheapest_fee(&WarehouseCode::new("USEA"), &shipment())
                .await;

            assert_eq!(result.status(), QuoteStatus::NoChannels);
            assert!(!result.has_quote());
            assert_eq!(mock.quote_calls(), 0);
        }

        #[tokio::test]
        async fn listing_error_is_reported_not_propagated() {
            let mock = Arc::new(MockFreightService::new().with_listing_error(
                "USEA",
                GatewayError::transport("connection refused"),
            ));
            let engine = engine(mock, config_for(&["USEA"]));

            let result = engine
                .cheapest_fee(&WarehouseCode::new("USEA"), &shipment())
                .await;

            assert_eq!(result.status(), QuoteStatus::ListingFailed);
            assert!(result.detail().unwrap().contains("connection refused"));
        }

        #[tokio::test]
        async fn declines_alone_mean_all_channels_failed() {
            let mock = Arc::new(
                MockFreightService::new()
                    .with_channels("USEA", &["A", "B"])
                    .with_quote("USEA", "A", QuoteBehavior::Declined)
                    .with_quote("USEA", "B", QuoteBehavior::Declined),
            );
            let engine = engine(mock, config_for(&["USEA"]));

            let result = engine
                .cheapest_fee(&WarehouseCode::new("USEA"), &shipment())
                .await;

            assert_eq!(result.status(), QuoteStatus::AllChannelsFailed);
            assert_eq!(result.quotes_collected(), 0);
            assert_eq!(result.channels_failed(), 0);
            assert!(result.detail().is_none());
        }

        #[tokio::test]
        async fn errors_are_collected_into_detail() {
            let mock = Arc::new(
                MockFreightService::new()
                    .with_channels("USEA", &["A", "B"])
                    .with_quote("USEA", "A", QuoteBehavior::Fail("tariff backend down".into()))
                    .with_quote("USEA", "B", QuoteBehavior::Fail("tariff backend down".into())),
            );
            let engine = engine(mock, config_for(&["USEA"]));

            let result = engine
                .cheapest_fee(&WarehouseCode::new("USEA"), &shipment())
                .await;

            assert_eq!(result.status(), QuoteStatus::AllChannelsFailed);
            assert_eq!(result.channels_failed(), 2);
            assert!(result.detail().unwrap().contains("A: "));
            assert!(result.detail().unwrap().contains("tariff backend down"));
        }

        #[tokio::test]
        async fn one_failure_does_not_spoil_the_batch() {
            let mock = Arc::new(
                MockFreightService::new()
                    .with_channels("USEA", &["A", "B"])
                    .with_quote("USEA", "A", QuoteBehavior::Fail("boom".into()))
                    .with_quote("USEA", "B", QuoteBehavior::Fee(dec!(65.30))),
            );
            let engine = engine(mock, config_for(&["USEA"]));

            let result = engine
                .cheapest_fee(&WarehouseCode::new("USEA"), &shipment())
                .await;

            assert_eq!(result.status(), QuoteStatus::Quoted);
            assert_eq!(result.fee(), Some(dec!(65.30)));
            assert_eq!(result.channels_failed(), 1);
        }

        #[tokio::test]
        async fn slow_channel_is_timed_out() {
            let mock = Arc::new(
                MockFreightService::new()
                    .with_channels("USEA", &["SLOW", "B"])
                    .with_quote(
                        "USEA",
                        "SLOW",
                        QuoteBehavior::Slow {
                            delay_ms: 5_000,
                            amount: dec!(1.00),
                        },
                    )
                    .with_quote("USEA", "B", QuoteBehavior::Fee(dec!(65.30))),
            );
            let engine = engine(
                mock,
                config_for(&["USEA"]).with_per_channel_timeout(50),
            );

            let result = engine
                .cheapest_fee(&WarehouseCode::new("USEA"), &shipment())
                .await;

            assert_eq!(result.status(), QuoteStatus::Quoted);
            assert_eq!(result.fee(), Some(dec!(65.30)));
            assert_eq!(result.channels_failed(), 1);
            assert!(result.detail().unwrap().contains("timed out"));
        }

        #[tokio::test]
        async fn max_channels_caps_the_fan_out() {
            let mock = Arc::new(
                MockFreightService::new()
                    .with_channels("USEA", &["A", "B", "C"])
                    .with_quote("USEA", "A", QuoteBehavior::Fee(dec!(78.50)))
                    .with_quote("USEA", "B", QuoteBehavior::Fee(dec!(65.30)))
                    .with_quote("USEA", "C", QuoteBehavior::Fee(dec!(1.00))),
            );
            let engine = engine(
                Arc::clone(&mock),
                config_for(&["USEA"]).with_max_channels(2),
            );

            let result = engine
                .cheapest_fee(&WarehouseCode::new("USEA"), &shipment())
                .await;

            assert_eq!(result.channels_listed(), 2);
            assert_eq!(mock.quote_calls(), 2);
            assert_eq!(result.fee(), Some(dec!(65.30)));
        }
    }

    mod across_warehouses {
        use super::*;

        #[tokio::test]
        async fn warehouses_run_independently() {
            let mock = Arc::new(
                MockFreightService::new()
                    .with_channels("USEA", &["A"])
                    .with_quote("USEA", "A", QuoteBehavior::Fee(dec!(40.00)))
                    .with_listing_error("USEE", GatewayError::transport("down")),
            );
            let engine = engine(mock, config_for(&["USEA", "USEE"]));

            let report = engine.shop(&shipment()).await;

            assert_eq!(report.results().len(), 2);
            let east = report.for_warehouse(&WarehouseCode::new("USEA")).unwrap();
            let east_coast = report.for_warehouse(&WarehouseCode::new("USEE")).unwrap();
            assert_eq!(east.status(), QuoteStatus::Quoted);
            assert_eq!(east_coast.status(), QuoteStatus::ListingFailed);
        }

        #[tokio::test]
        async fn report_keeps_configuration_order() {
            let mock = Arc::new(
                MockFreightService::new()
                    .with_channels("USEE", &["A"])
                    .with_quote("USEE", "A", QuoteBehavior::Fee(dec!(50.00)))
                    .with_channels("USEA", &["A"])
                    .with_quote("USEA", "A", QuoteBehavior::Fee(dec!(60.00))),
            );
            let engine = engine(mock, config_for(&["USEE", "USEA"]));

            let report = engine.shop(&shipment()).await;

            assert_eq!(report.results().first().unwrap().warehouse().as_str(), "USEE");
            assert_eq!(report.results().get(1).unwrap().warehouse().as_str(), "USEA");
        }

        #[tokio::test]
        async fn best_and_savings_compare_warehouses() {
            let mock = Arc::new(
                MockFreightService::new()
                    .with_channels("USEA", &["A"])
                    .with_quote("USEA", "A", QuoteBehavior::Fee(dec!(78.50)))
                    .with_channels("USEE", &["A"])
                    .with_quote("USEE", "A", QuoteBehavior::Fee(dec!(65.30))),
            );
            let engine = engine(mock, config_for(&["USEA", "USEE"]));

            let report = engine.shop(&shipment()).await;

            assert_eq!(report.best().unwrap().warehouse().as_str(), "USEE");
            assert_eq!(report.savings(), Some(dec!(13.20)));
            assert_eq!(report.quoted_count(), 2);
        }

        #[tokio::test]
        async fn savings_needs_two_quoted_warehouses() {
            let mock = Arc::new(
                MockFreightService::new()
                    .with_channels("USEA", &["A"])
                    .with_quote("USEA", "A", QuoteBehavior::Fee(dec!(78.50))),
            );
            let engine = engine(mock, config_for(&["USEA", "USEE"]));

            let report = engine.shop(&shipment()).await;

            assert_eq!(report.quoted_count(), 1);
            assert_eq!(report.savings(), None);
        }
    }

    mod reporting {
        use super::*;

        #[tokio::test]
        async fn summary_has_the_flat_consumer_shape() {
            let mock = Arc::new(
                MockFreightService::new()
                    .with_channels("USEA", &["E-USPS"])
                    .with_quote("USEA", "E-USPS", QuoteBehavior::Fee(dec!(65.30))),
            );
            let engine = engine(mock, config_for(&["USEA"]));

            let report = engine.shop(&shipment()).await;
            let summary = report.summaries().into_iter().next().unwrap();
            let json = serde_json::to_value(&summary).unwrap();

            assert_eq!(json["warehouse"], "USEA");
            assert_eq!(json["fee"], "65.30");
            assert_eq!(json["channel"], "E-USPS");
            assert_eq!(json["status"], "quoted");
        }

        #[tokio::test]
        async fn failed_summary_nulls_fee_and_channel() {
            let mock = Arc::new(MockFreightService::new());
            let engine = engine(mock, config_for(&["USEA"]));

            let report = engine.shop(&shipment()).await;
            let summary = report.summaries().into_iter().next().unwrap();
            let json = serde_json::to_value(&summary).unwrap();

            assert!(json["fee"].is_null());
            assert!(json["channel"].is_null());
            assert_eq!(json["status"], "no available channels");
        }

        #[tokio::test]
        async fn warehouse_label_flows_into_the_result() {
            let mock = Arc::new(
                MockFreightService::new()
                    .with_channels("USEA", &["A"])
                    .with_quote("USEA", "A", QuoteBehavior::Fee(dec!(65.30))),
            );
            let config = RateShopConfig::new(
                CountryCode::new("US"),
                vec![Warehouse::new(WarehouseCode::new("USEA")).with_label("US East")],
            );
            let engine = engine(mock, config);

            let report = engine.shop(&shipment()).await;
            let result = report.results().first().unwrap();

            assert_eq!(result.label(), Some("US East"));
            assert_eq!(result.display_name(), "US East");
            assert!(result.to_string().starts_with("USEA (US East): "));

            let json = serde_json::to_value(result.summary()).unwrap();
            assert_eq!(json["warehouse"], "USEA");
            assert_eq!(json["label"], "US East");
        }

        #[tokio::test]
        async fn unlabeled_warehouse_falls_back_to_its_code() {
            let mock = Arc::new(
                MockFreightService::new()
                    .with_channels("USEA", &["A"])
                    .with_quote("USEA", "A", QuoteBehavior::Fee(dec!(65.30))),
            );
            let engine = engine(mock, config_for(&["USEA"]));

            let report = engine.shop(&shipment()).await;
            let result = report.results().first().unwrap();

            assert_eq!(result.label(), None);
            assert_eq!(result.display_name(), "USEA");

            let json = serde_json::to_value(result.summary()).unwrap();
            assert!(json.get("label").is_none());
        }

        #[test]
        fn status_display_matches_consumer_wording() {
            assert_eq!(QuoteStatus::Quoted.to_string(), "quoted");
            assert_eq!(QuoteStatus::NoChannels.to_string(), "no available channels");
            assert_eq!(
                QuoteStatus::AllChannelsFailed.to_string(),
                "all channels failed quoting"
            );
            assert_eq!(
                QuoteStatus::ListingFailed.to_string(),
                "channel listing failed"
            );
        }

        #[test]
        fn config_builders_chain() {
            let config = config_for(&["USEA"])
                .with_per_channel_timeout(2_500)
                .with_max_channels(5);
            assert_eq!(config.per_channel_timeout_ms, 2_500);
            assert_eq!(config.max_channels, Some(5));
        }
    }
}
