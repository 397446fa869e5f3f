//! Built-in control request handlers.

pub mod client_verification;
pub mod connected;
pub mod handshake;
pub mod status;

use std::sync::Arc;

use tunnelapi_core::error::Result;
use tunnelapi_core::protocol::{Params, RequestName};

use crate::context::ApiContext;
use crate::dispatch::ApiHandler;
use crate::params::{params_for, validate_params, ParamSpec};

pub use client_verification::ClientVerificationHandler;
pub use connected::ConnectedHandler;
pub use handshake::HandshakeHandler;
pub use status::StatusHandler;

pub fn builtin_handlers() -> Vec<Arc<dyn ApiHandler>> {
    vec![
        Arc::new(HandshakeHandler::new()),
        Arc::new(ConnectedHandler::new()),
        Arc::new(StatusHandler::new()),
        Arc::new(ClientVerificationHandler::new()),
    ]
}

/// Validate against the request's contract and return that contract for
/// log-field building. The specific failure is logged here and never reaches
/// the client, which only sees `INVALID_PARAMS`.
fn validate_request(
    ctx: &ApiContext<'_>,
    request: RequestName,
    params: Params<'_>,
) -> Result<&'static [ParamSpec]> {
    let specs = params_for(request);
    if let Err(e) = validate_params(ctx.config, params, specs) {
        tracing::debug!(request = %request, error = %e, "request params rejected");
        return Err(e);
    }
    Ok(specs)
}
