//! Plain-data HTTP types exchanged between the dispatcher and a transport.

mod request;
mod response;

pub use request::{GatewayRequest, Method};
pub use response::{GatewayResponse, StatusCode};
