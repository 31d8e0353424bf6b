//! Connection reuse settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Keep-alive policy for the pooled connections of an [`Agent`](super::Agent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionSettings {
    /// Whether idle connections are kept open for reuse.
    pub keep_alive: bool,
    /// Idle keep-alive interval in milliseconds.
    pub keep_alive_msecs: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            keep_alive: true,
            keep_alive_msecs: 1500,
        }
    }
}

impl ConnectionSettings {
    /// Create settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable keep-alive.
    pub fn keep_alive(mut self, keep_alive: bool) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    /// Set the idle keep-alive interval in milliseconds.
    pub fn keep_alive_msecs(mut self, msecs: u64) -> Self {
        self.keep_alive_msecs = msecs;
        self
    }

    /// Idle keep-alive interval as a duration.
    pub fn keep_alive_interval(&self) -> Duration {
        Duration::from_millis(self.keep_alive_msecs)
    }
}
