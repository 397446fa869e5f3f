use tunnelapi_core::error::Result;
use tunnelapi_core::protocol::response::encode;
use tunnelapi_core::protocol::timestamp::current_timestamp;
use tunnelapi_core::protocol::{HandshakeResponse, Params, RequestName};

use crate::context::ApiContext;
use crate::dispatch::ApiHandler;
use crate::obs::request_log_fields;

/// `handshake`: made right after the tunnel is established.
///
/// Homepages, regexes and server lists come from a directory service that is
/// not wired in here, so only the server timestamp is filled.
#[derive(Debug, Default)]
pub struct HandshakeHandler;

impl HandshakeHandler {
    pub fn new() -> Self {
        Self
    }
}

impl ApiHandler for HandshakeHandler {
    fn request(&self) -> RequestName {
        RequestName::Handshake
    }

    fn handle(&self, ctx: &ApiContext<'_>, params: Params<'_>) -> Result<Vec<u8>> {
        // "known_servers" is accepted and ignored.
        let specs = super::validate_request(ctx, self.request(), params)?;

        ctx.log_event(request_log_fields(
            ctx.config,
            "handshake",
            ctx.geoip,
            params,
            specs,
        ));

        encode(&HandshakeResponse {
            server_timestamp: current_timestamp(),
            ..Default::default()
        })
    }
}
