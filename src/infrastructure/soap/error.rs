//! # Gateway Errors
//!
//! Error types for SOAP gateway communication.
//!
//! The taxonomy mirrors where a call died: [`GatewayError::Transport`] for
//! network and timeout failures, [`GatewayError::Protocol`] for replies that
//! are not the expected SOAP shape, and [`GatewayError::Decode`] for payloads
//! that survived extraction but are not valid JSON. A vendor reply that is
//! well-formed but negative ("no channel serves this lane") is not an error
//! at all and never appears here.

use thiserror::Error;

/// Errors raised while talking to the vendor's SOAP endpoint.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Network-level failure: connect, send, read, or timeout.
    #[error("gateway transport error: {message}")]
    Transport {
        /// What failed at the network level.
        message: String,
    },

    /// Reply arrived but is not the expected SOAP shape.
    #[error("gateway protocol error: {message}")]
    Protocol {
        /// What was wrong with the reply shape.
        message: String,
    },

    /// Extracted payload is not valid JSON.
    #[error("gateway decode error: {message}")]
    Decode {
        /// What failed to decode.
        message: String,
    },

    /// Failure inside the gateway itself, before anything was sent.
    #[error("gateway internal error: {message}")]
    Internal {
        /// What went wrong locally.
        message: String,
    },
}

impl GatewayError {
    /// Creates a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` for failures that may clear up on retry.
    ///
    /// Only transport failures are considered transient. A protocol or
    /// decode failure means the endpoint is speaking something unexpected
    /// and retrying will not fix it.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns `true` if this is a transport error.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns `true` if this is a protocol error.
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol { .. })
    }

    /// Returns `true` if this is a decode error.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
