//! Transport layer.
//!
//! Carries request bytes to the dispatcher; the dispatcher itself never
//! touches sockets and does not bound payload size.

pub mod http;
