//! tunnelapi core: transport-agnostic control-channel API primitives.
//!
//! This crate defines the wire-level contracts shared by the gateway and any
//! other transport that carries control requests: request names, the decoded
//! payload with typed accessors, response shapes, timestamp helpers, and the
//! error surface. It carries no transport or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Malformed client
//! input must surface as `ApiError`/`Result`, never as a crash.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

pub use error::{ApiError, ClientCode, Result};
