//! Wire types of the gateway's function management API.

mod request;
mod status;

pub use request::{DeployRequest, RemoveRequest, DEFAULT_NETWORK};
pub use status::FunctionStatus;
