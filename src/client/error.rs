//! Normalized call failure.

use crate::transport::TransportError;

/// Service name used in failure messages.
pub(crate) const SERVICE: &str = "FaaS";

/// Status carried by a [`FaasError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStatus {
    /// An HTTP status code, either from the gateway or assigned by the client.
    Code(u16),
    /// No response was received from the gateway.
    NoResponse,
}

impl FailureStatus {
    /// The numeric code, if a response was received.
    pub fn code(&self) -> Option<u16> {
        match self {
            FailureStatus::Code(code) => Some(*code),
            FailureStatus::NoResponse => None,
        }
    }
}

impl std::fmt::Display for FailureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureStatus::Code(code) => write!(f, "{}", code),
            FailureStatus::NoResponse => write!(f, "No response"),
        }
    }
}

/// A failed gateway call.
///
/// Every failure a call can hit (transport, decoding, or a failure status
/// reported by the gateway) is surfaced as this one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaasError {
    /// Human-readable message.
    pub message: String,
    /// Status code, or [`FailureStatus::NoResponse`].
    pub status: FailureStatus,
    /// Raw error body or underlying error text.
    pub detail: Option<String>,
}

impl FaasError {
    /// Create a new FaasError.
    pub fn new(message: impl Into<String>, status: FailureStatus) -> Self {
        Self {
            message: message.into(),
            status,
            detail: None,
        }
    }

    /// Attach supplementary detail.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// The call never produced a usable response.
    pub fn transport(err: &TransportError) -> Self {
        let status = err
            .status()
            .map(FailureStatus::Code)
            .unwrap_or(FailureStatus::NoResponse);
        Self::new(format!("Failed to make {} call: {}", SERVICE, err), status)
    }

    /// The request payload could not be encoded; nothing was sent.
    pub fn encode(reason: impl std::fmt::Display) -> Self {
        Self::new(
            format!("Failed to make {} call: {}", SERVICE, reason),
            FailureStatus::NoResponse,
        )
    }

    /// A 200 response whose body could not be decoded.
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::new(
            format!("Failed to complete {} call", SERVICE),
            FailureStatus::Code(500),
        )
        .with_detail(reason)
    }

    /// The gateway answered with a failure status.
    pub fn status(code: u16, body: impl Into<String>) -> Self {
        Self::new(
            format!("Failed status from {} call: ", SERVICE),
            FailureStatus::Code(code),
        )
        .with_detail(body)
    }

    /// Whether no response was received.
    pub fn is_no_response(&self) -> bool {
        self.status == FailureStatus::NoResponse
    }
}

impl std::fmt::Display for FaasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for FaasError {}
