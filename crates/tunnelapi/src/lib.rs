//! Top-level facade crate for tunnelapi.
//!
//! Re-exports the core wire types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use tunnelapi_core::*;
}

pub mod gateway {
    pub use tunnelapi_gateway::*;
}
