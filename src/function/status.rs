//! Function entries as reported by the gateway's function list.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One deployed function, as listed by `GET /system/functions`.
///
/// Only `name` is guaranteed; gateways differ in which of the remaining
/// fields they report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionStatus {
    /// Function name.
    pub name: String,
    /// Container image the function runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Number of invocations recorded by the gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation_count: Option<u64>,
    /// Desired replica count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u64>,
    /// Replicas ready to serve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_replicas: Option<u64>,
    /// Process the watchdog forks per request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_process: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<HashMap<String, String>>,
}

impl FunctionStatus {
    /// Create an entry carrying only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
