//! tunnelapi gateway library entry.
//!
//! This crate wires configuration, the parameter contracts, the dispatcher and
//! its handlers, analytics logging, and the HTTP transport into a cohesive
//! control-channel API server. It is consumed by the binary (`main.rs`) and by
//! integration tests; other transports can drive [`dispatch::Dispatcher`]
//! directly.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod obs;
pub mod ops;
pub mod params;
pub mod router;
pub mod services;
pub mod transport;
