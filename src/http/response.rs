//! Gateway response as returned by a transport: status line, headers and the
//! fully collected body.

use bytes::Bytes;
use std::collections::HashMap;

/// HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);

    /// 2xx or 3xx.
    pub fn is_success_or_redirect(&self) -> bool {
        (200..400).contains(&self.0)
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::OK
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

/// Response received from the gateway.
#[derive(Debug, Clone, Default)]
pub struct GatewayResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Reason phrase accompanying the status code.
    pub status_text: String,
    /// HTTP headers, names lower-cased.
    pub headers: HashMap<String, String>,
    /// Response body, already inflated if the transport negotiated compression.
    pub body: Bytes,
}

impl GatewayResponse {
    /// Create an empty response with the given status code.
    pub fn new(status: u16) -> Self {
        Self {
            status: StatusCode(status),
            ..Self::default()
        }
    }

    /// Set the reason phrase.
    pub fn status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    /// Set the response body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Decode the body as strict UTF-8 text.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Decode the body as text, replacing invalid UTF-8 sequences.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Parse the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_or_redirect_range() {
        assert!(StatusCode::OK.is_success_or_redirect());
        assert!(StatusCode(202).is_success_or_redirect());
        assert!(StatusCode(399).is_success_or_redirect());
        assert!(!StatusCode(199).is_success_or_redirect());
        assert!(!StatusCode(400).is_success_or_redirect());
        assert_eq!(u16::from(StatusCode(201)), 201);
    }

    #[test]
    fn test_strict_and_lossy_text() {
        let response = GatewayResponse::new(200).body(vec![0x68, 0x69, 0xff]);
        assert!(response.text().is_err());
        assert_eq!(response.text_lossy(), "hi\u{fffd}");
    }

    #[test]
    fn test_json_body() {
        let response = GatewayResponse::new(200).body(r#"[{"name":"figlet"}]"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value[0]["name"], "figlet");
    }
}
