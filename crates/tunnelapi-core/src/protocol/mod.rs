//! Control-channel wire contracts.
//!
//! - `request`: the enumerated request names and the transport size ceiling.
//! - `params`: the decoded JSON payload and its typed, fallible accessors.
//! - `response`: response shapes and their encoding.
//! - `timestamp`: server timestamp formatting and hour truncation.
//!
//! Accessors never panic or index blindly: a missing field and a field of the
//! wrong shape are reported as distinct `ApiError` variants.

pub mod params;
pub mod request;
pub mod response;
pub mod timestamp;

pub use params::{Params, Payload};
pub use request::{RequestName, MAX_API_PARAMS_SIZE};
pub use response::{ConnectedResponse, HandshakeResponse};
