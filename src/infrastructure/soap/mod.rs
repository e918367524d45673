//! # SOAP Transport
//!
//! Wire-level plumbing for the vendor's `callService` endpoint: envelope
//! construction, payload extraction, and the HTTP gateway itself.

pub mod envelope;
pub mod error;
pub mod gateway;

pub use envelope::{build_envelope, escape_xml, unescape_xml, ResponseExtractor};
pub use error::{GatewayError, GatewayResult};
pub use gateway::SoapGateway;
