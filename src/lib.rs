//! # faas-client
//!
//! Async client for a functions-as-a-service gateway. Invoke deployed
//! functions by name and get back a classified [`Outcome`], or manage
//! deployments through the gateway's `/system/functions` API.
//!
//! ```text
//!  FaasClient::invoke / list / inspect / deploy / remove
//!          │
//!          ▼
//!  dispatch()  ── builds GatewayRequest ──▶  Transport (Agent, pooled hyper client)
//!          │                                        │
//!          ◀──────────── GatewayResponse ───────────┘
//!          │
//!          ▼
//!  Ok(Outcome::Body | Outcome::Wrapped)  or  Err(FaasError)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use faas_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let client = FaasClient::new(
//!         "http://127.0.0.1:8080",
//!         ClientOptions::new().username("admin").password("secret"),
//!     );
//!
//!     client.deploy("figlet", "functions/figlet:latest", DeployOptions::default()).await?;
//!
//!     match client.invoke("figlet", Some("Hello".into()), InvokeOptions::default()).await? {
//!         Outcome::Body(body) => println!("{:?}", body),
//!         Outcome::Wrapped(wrapped) => println!("status {}: {}", wrapped.status, wrapped.body),
//!     }
//!
//!     if let Some(entry) = client.inspect("figlet").await? {
//!         println!("{}", entry);
//!     }
//!
//!     client.remove("figlet").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Response classification
//!
//! Only an exact `200` is decoded (JSON, text or raw bytes, per the call's
//! options). Any other status below `400` comes back as
//! [`Outcome::Wrapped`] with the undecoded body. Everything else, and any
//! transport failure, is a [`FaasError`].

pub mod client;
pub mod function;
pub mod http;
pub mod transport;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::client::{
        ClientOptions, DeployOptions, FaasClient, FaasError, FailureStatus, InvokeOptions,
        ListOptions, Outcome, Payload, ResponseBody, WrappedResponse,
    };
    pub use crate::function::FunctionStatus;
    pub use crate::transport::{Agent, ConnectionSettings, Transport};
}

// Re-export for convenience
pub use client::{
    dispatch, CallConfig, ClientOptions, FaasClient, FaasError, FailureStatus, Outcome, Payload,
};
pub use transport::{Agent, ConnectionSettings, Transport, TransportError};
