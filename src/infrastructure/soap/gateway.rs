//! # SOAP Gateway
//!
//! HTTP transport for the vendor's `callService` SOAP endpoint.
//!
//! Every vendor operation goes through the same wire shape: POST one
//! envelope carrying a JSON params document plus the account credentials,
//! then pull JSON back out of the reply. [`SoapGateway`] owns that exchange
//! end to end and hands decoded [`serde_json::Value`] payloads to the
//! service layer, which knows what each operation's payload means.
//!
//! # Examples
//!
//! ```no_run
//! use freight_rfq::config::GatewaySettings;
//! use freight_rfq::infrastructure::soap::SoapGateway;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = GatewaySettings {
//!     endpoint: "http://api.example.org/default/svc/web-service".to_string(),
//!     app_token: "your-app-token".to_string(),
//!     app_key: "your-app-key".to_string(),
//!     timeout_ms: 10_000,
//! };
//! let gateway = SoapGateway::new(&settings)?;
//! let reply = tokio_test::block_on(gateway.call(
//!     "getShippingMethod",
//!     &json!({"warehouse_code": "USEA", "country_code": "US"}),
//! ))?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::GatewaySettings;
use crate::infrastructure::soap::envelope::{build_envelope, ResponseExtractor};
use crate::infrastructure::soap::error::{GatewayError, GatewayResult};

/// Longest reply fragment quoted back in error messages.
const MAX_BODY_SNIPPET: usize = 200;

/// Client for the vendor's `callService` SOAP endpoint.
pub struct SoapGateway {
    client: Client,
    endpoint: String,
    app_token: String,
    app_key: String,
    timeout_ms: u64,
    extractor: ResponseExtractor,
}

impl SoapGateway {
    /// Creates a gateway from validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] if the HTTP client or the reply
    /// extractor fails to build.
    pub fn new(settings: &GatewaySettings) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(|e| GatewayError::internal(format!("http client failed to build: {e}")))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            app_token: settings.app_token.clone(),
            app_key: settings.app_key.clone(),
            timeout_ms: settings.timeout_ms,
            extractor: ResponseExtractor::new()?,
        })
    }

    /// Calls a vendor service and returns its decoded JSON payload.
    ///
    /// `params` is serialized to JSON and embedded in the request envelope.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Transport`] on connect, send, read, or timeout
    ///   failures and on 5xx statuses
    /// - [`GatewayError::Protocol`] on other non-success statuses and on
    ///   replies without a `<response>` element
    /// - [`GatewayError::Decode`] when the extracted payload is not JSON
    /// - [`GatewayError::Internal`] when `params` cannot be serialized
    pub async fn call<P>(&self, service: &str, params: &P) -> GatewayResult<Value>
    where
        P: Serialize + ?Sized,
    {
        let params_json = serde_json::to_string(params)
            .map_err(|e| GatewayError::internal(format!("params failed to serialize: {e}")))?;
        let envelope = build_envelope(service, &params_json, &self.app_token, &self.app_key);

        debug!(
            service,
            endpoint = %self.endpoint,
            bytes = envelope.len(),
            "dispatching callService"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(envelope)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status_error(status, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_reqwest_error(&e))?;
        let payload = self.extractor.extract(&body)?;

        serde_json::from_str(&payload)
            .map_err(|e| GatewayError::decode(format!("service payload is not valid json: {e}")))
    }

    // ========== Accessors ==========

    /// Returns the endpoint URL.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the request timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    // ========== Error Mapping ==========

    fn map_reqwest_error(&self, error: &reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::transport(format!("request timed out after {}ms", self.timeout_ms))
        } else if error.is_connect() {
            GatewayError::transport(format!("connection failed: {error}"))
        } else {
            GatewayError::transport(format!("http request failed: {error}"))
        }
    }

    fn map_status_error(status: StatusCode, body: &str) -> GatewayError {
        let snippet: String = body.chars().take(MAX_BODY_SNIPPET).collect();
        if status.is_server_error() {
            GatewayError::transport(format!("server error ({status}): {snippet}"))
        } else {
            GatewayError::protocol(format!("unexpected http status ({status}): {snippet}"))
        }
    }
}

impl fmt::Debug for SoapGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoapGateway")
            .field("endpoint", &self.endpoint)
            .field("timeout_ms", &self.timeout_ms)
            .field("app_token", &"<redacted>")
            .field("app_key", &"<redacted>")
            .finish()
    }
}
