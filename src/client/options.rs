//! Client construction and per-operation options.

use crate::function::DEFAULT_NETWORK;
use crate::transport::ConnectionSettings;
use serde::{Deserialize, Serialize};

/// Gateway address used when none is given.
pub const DEFAULT_GATEWAY: &str = "http://127.0.0.1:8080";

/// Options for constructing a [`FaasClient`](super::FaasClient).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientOptions {
    /// Username for administrative calls.
    pub username: Option<String>,
    /// Password for administrative calls.
    pub password: Option<String>,
    /// Keep-alive policy of the shared connection pool.
    #[serde(alias = "agentSettings")]
    pub connection_settings: ConnectionSettings,
}

impl ClientOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the connection settings.
    pub fn connection_settings(mut self, settings: ConnectionSettings) -> Self {
        self.connection_settings = settings;
        self
    }
}

/// Options for [`FaasClient::invoke`](super::FaasClient::invoke).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvokeOptions {
    /// Send the payload as JSON and decode a 200 body as JSON.
    pub is_json: bool,
    /// Return a 200 body as raw bytes.
    pub is_binary_response: bool,
}

impl InvokeOptions {
    pub fn json() -> Self {
        Self {
            is_json: true,
            ..Self::default()
        }
    }

    pub fn binary() -> Self {
        Self {
            is_binary_response: true,
            ..Self::default()
        }
    }
}

/// Options for [`FaasClient::list`](super::FaasClient::list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Decode the function list as JSON.
    pub is_json: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self { is_json: true }
    }
}

/// Options for [`FaasClient::deploy`](super::FaasClient::deploy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    /// Network to attach the function to.
    pub network: String,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
        }
    }
}

impl DeployOptions {
    pub fn network(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
        }
    }
}
