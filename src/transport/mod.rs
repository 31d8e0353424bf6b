//! Transport seam between the dispatcher and the network.
//!
//! A [`Transport`] takes a fully shaped [`GatewayRequest`] and returns the
//! status line, headers and collected body, or a [`TransportError`] when no
//! usable response was obtained. [`Agent`] is the pooled hyper-based
//! implementation every [`FaasClient`](crate::FaasClient) holds.

mod agent;
mod settings;

pub use agent::Agent;
pub use settings::ConnectionSettings;

use crate::http::{GatewayRequest, GatewayResponse};
use async_trait::async_trait;

/// Sends gateway requests.
///
/// Implementations must be safe to share between concurrently running calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one request and collect the whole response.
    async fn send(&self, request: GatewayRequest) -> Result<GatewayResponse, TransportError>;
}

/// Failure to obtain a usable response from the gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be built (bad URL, header or credentials).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Connecting or exchanging the request failed before a status arrived.
    #[error("request failed: {0}")]
    Connect(String),

    /// The status line arrived but the body could not be read.
    #[error("failed to read response body: {message}")]
    Body { status: u16, message: String },

    /// The body could not be inflated per its `Content-Encoding`.
    #[error("failed to decompress response body: {message}")]
    Decompress { status: u16, message: String },
}

impl TransportError {
    /// Status code received before the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::InvalidRequest(_) | TransportError::Connect(_) => None,
            TransportError::Body { status, .. } | TransportError::Decompress { status, .. } => {
                Some(*status)
            }
        }
    }
}
