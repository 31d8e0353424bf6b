//! The remote-call dispatcher.
//!
//! [`dispatch`] shapes one request to the gateway, sends it through a
//! [`Transport`] and classifies the response:
//!
//! | Response                         | Result                          |
//! |----------------------------------|---------------------------------|
//! | no response (transport failure)  | `Err`, [`FailureStatus::NoResponse`] unless a status arrived |
//! | `200`                            | `Ok(Outcome::Body)`, decoded per [`CallConfig`] (decode failure is `Err` with 500) |
//! | `201..=399`                      | `Ok(Outcome::Wrapped)`, body left undecoded |
//! | anything else                    | `Err` with the gateway status and body |
//!
//! Only an exact 200 is decoded. Other success and redirect statuses come back
//! wrapped so the caller has to look at them.
//!
//! [`FailureStatus::NoResponse`]: super::FailureStatus::NoResponse

use super::error::FaasError;
use crate::http::{GatewayRequest, GatewayResponse, Method, StatusCode};
use crate::transport::{Agent, ConnectionSettings, Transport};
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

/// Client identification sent with every call.
pub const USER_AGENT: &str = concat!("faas-client/", env!("CARGO_PKG_VERSION"));

const JSON_CONTENT_TYPE: &str = "application/json";

/// Request body for a call.
///
/// Only objects and arrays are JSON-encoded. Other JSON scalars go out as
/// their plain text, and falsy ones (`null`, `false`, `0`, `""`) count as no
/// payload at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    /// Sent as-is.
    Raw(Bytes),
}

impl Payload {
    /// Encode any serializable value as a JSON body, keeping field order.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_vec(value).map(|encoded| Payload::Raw(Bytes::from(encoded)))
    }

    /// Whether this payload is sent as no body at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Json(Value::Null) | Payload::Json(Value::Bool(false)) => true,
            Payload::Json(Value::Number(n)) => n.as_f64() == Some(0.0),
            Payload::Json(Value::String(text)) => text.is_empty(),
            Payload::Json(_) => false,
            Payload::Raw(bytes) => bytes.is_empty(),
        }
    }

    fn to_bytes(&self) -> Result<Bytes, serde_json::Error> {
        match self {
            Payload::Json(value @ (Value::Object(_) | Value::Array(_))) => {
                serde_json::to_vec(value).map(Bytes::from)
            }
            Payload::Json(Value::String(text)) => Ok(Bytes::from(text.clone())),
            Payload::Json(scalar) => Ok(Bytes::from(scalar.to_string())),
            Payload::Raw(bytes) => Ok(bytes.clone()),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Raw(Bytes::copy_from_slice(text.as_bytes()))
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Raw(Bytes::from(text))
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Raw(Bytes::from(bytes))
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Payload::Raw(bytes)
    }
}

/// Per-call options.
#[derive(Clone, Copy)]
pub struct CallConfig<'a> {
    /// Send `Content-Type: application/json` and decode a 200 body as JSON.
    pub is_json: bool,
    /// Skip `Accept-Encoding: utf8` and return a 200 body as raw bytes.
    pub is_binary_response: bool,
    /// Explicit method; otherwise POST with a payload, GET without.
    pub method: Option<Method>,
    /// Let the transport negotiate response compression.
    pub compress: bool,
    /// Shared connection pool to send through.
    pub connection: Option<&'a dyn Transport>,
}

impl Default for CallConfig<'_> {
    fn default() -> Self {
        Self {
            is_json: false,
            is_binary_response: false,
            method: None,
            compress: true,
            connection: None,
        }
    }
}

impl std::fmt::Debug for CallConfig<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallConfig")
            .field("is_json", &self.is_json)
            .field("is_binary_response", &self.is_binary_response)
            .field("method", &self.method)
            .field("compress", &self.compress)
            .field("connection", &self.connection.is_some())
            .finish()
    }
}

/// Decoded body of a 200 response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
    Binary(Bytes),
}

/// A non-200 success or redirect response, passed through undecoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

/// Successful result of one call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Status was exactly 200.
    Body(ResponseBody),
    /// Status was between 200 and 400, exclusive.
    Wrapped(WrappedResponse),
}

impl Outcome {
    /// The decoded JSON value, if this is a JSON body.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Outcome::Body(ResponseBody::Json(value)) => Some(value),
            _ => None,
        }
    }

    /// The decoded text, if this is a text body.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Outcome::Body(ResponseBody::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// The raw bytes, if this is a binary body.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Outcome::Body(ResponseBody::Binary(bytes)) => Some(bytes),
            _ => None,
        }
    }

    /// The wrapped response, if the status was not exactly 200.
    pub fn as_wrapped(&self) -> Option<&WrappedResponse> {
        match self {
            Outcome::Wrapped(wrapped) => Some(wrapped),
            Outcome::Body(_) => None,
        }
    }
}

/// Issue one call against `gateway` + `path` and classify the response.
pub async fn dispatch(
    gateway: &str,
    path: &str,
    payload: Option<&Payload>,
    config: CallConfig<'_>,
) -> Result<Outcome, FaasError> {
    let request = build_request(gateway, path, payload, &config)?;

    let response = match config.connection {
        Some(transport) => transport.send(request).await,
        None => {
            Agent::new(gateway, &ConnectionSettings::default())
                .send(request)
                .await
        }
    }
    .map_err(|e| FaasError::transport(&e))?;

    classify(response, &config)
}

fn build_request(
    gateway: &str,
    path: &str,
    payload: Option<&Payload>,
    config: &CallConfig<'_>,
) -> Result<GatewayRequest, FaasError> {
    let mut request = GatewayRequest::new(Method::Get, format!("{}{}", gateway, path))
        .header("User-Agent", USER_AGENT)
        .compress(config.compress);

    if config.is_json {
        request = request.header("Content-Type", JSON_CONTENT_TYPE);
    }
    if !config.is_binary_response {
        request = request.header("Accept-Encoding", "utf8");
    }

    match payload.filter(|p| !p.is_empty()) {
        Some(payload) => {
            let body = payload.to_bytes().map_err(FaasError::encode)?;
            request.method = config.method.unwrap_or(Method::Post);
            request = request.body(body);
        }
        None => request.method = config.method.unwrap_or(Method::Get),
    }

    Ok(request)
}

fn classify(response: GatewayResponse, config: &CallConfig<'_>) -> Result<Outcome, FaasError> {
    if response.status == StatusCode::OK {
        decode(&response, config).map(Outcome::Body)
    } else if response.status.is_success_or_redirect() {
        Ok(Outcome::Wrapped(WrappedResponse {
            status: response.status.into(),
            status_text: response.status_text.clone(),
            body: response.text_lossy(),
        }))
    } else {
        Err(FaasError::status(response.status.into(), response.text_lossy()))
    }
}

fn decode(response: &GatewayResponse, config: &CallConfig<'_>) -> Result<ResponseBody, FaasError> {
    if config.is_json {
        response
            .json()
            .map(ResponseBody::Json)
            .map_err(|e| FaasError::decode(e.to_string()))
    } else if config.is_binary_response {
        Ok(ResponseBody::Binary(response.body.clone()))
    } else {
        response
            .text()
            .map(ResponseBody::Text)
            .map_err(|e| FaasError::decode(e.to_string()))
    }
}
