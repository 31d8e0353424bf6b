//! Gateway client: the call dispatcher and the facade built on it.

mod dispatch;
mod error;
mod facade;
mod options;

pub use dispatch::{
    dispatch, CallConfig, Outcome, Payload, ResponseBody, WrappedResponse, USER_AGENT,
};
pub use error::{FaasError, FailureStatus};
pub use facade::FaasClient;
pub use options::{ClientOptions, DeployOptions, InvokeOptions, ListOptions, DEFAULT_GATEWAY};
