//! Administrative request bodies.

use serde::{Deserialize, Serialize};

/// Network functions are attached to unless told otherwise.
pub const DEFAULT_NETWORK: &str = "func_functions";

/// Body of `POST /system/functions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployRequest {
    /// Function name.
    pub service: String,
    /// Container image to run.
    pub image: String,
    /// Network to attach the function to.
    pub network: String,
}

impl DeployRequest {
    /// Create a deploy request on the default network.
    pub fn new(service: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            image: image.into(),
            network: DEFAULT_NETWORK.to_string(),
        }
    }

    /// Set the network.
    pub fn network(mut self, network: impl Into<String>) -> Self {
        self.network = network.into();
        self
    }
}

/// Body of `DELETE /system/functions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    /// Name of the function to remove.
    pub function_name: String,
}

impl RemoveRequest {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deploy_wire_shape() {
        let json = serde_json::to_string(&DeployRequest::new("f", "img:tag")).unwrap();
        assert_eq!(json, r#"{"service":"f","image":"img:tag","network":"func_functions"}"#);

        let custom = DeployRequest::new("f", "img:tag").network("private");
        assert_eq!(custom.network, "private");
    }

    #[test]
    fn test_remove_wire_shape() {
        let json = serde_json::to_string(&RemoveRequest::new("f")).unwrap();
        assert_eq!(json, r#"{"functionName":"f"}"#);
    }
}
