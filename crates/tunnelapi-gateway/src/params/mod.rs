//! Request parameter contracts (validators, per-request contract lists, engine).
//!
//! Contract lists are compiled into statics at first use and shared read-only by
//! every request; nothing here holds per-connection state.

pub mod engine;
pub mod registry;
pub mod validators;

pub use engine::validate_params;
pub use registry::{params_for, ParamFlags, ParamSpec};
