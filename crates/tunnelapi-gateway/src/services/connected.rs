use chrono::Utc;

use tunnelapi_core::error::Result;
use tunnelapi_core::protocol::response::encode;
use tunnelapi_core::protocol::timestamp::{format_timestamp, truncate_to_hour};
use tunnelapi_core::protocol::{ConnectedResponse, Params, RequestName};

use crate::context::ApiContext;
use crate::dispatch::ApiHandler;
use crate::obs::request_log_fields;

/// `connected`: made once a tunnel is up and at least once per day.
///
/// The response timestamp is truncated to the hour; clients echo it back as
/// `last_connected` on their next request.
#[derive(Debug, Default)]
pub struct ConnectedHandler;

impl ConnectedHandler {
    pub fn new() -> Self {
        Self
    }
}

impl ApiHandler for ConnectedHandler {
    fn request(&self) -> RequestName {
        RequestName::Connected
    }

    fn handle(&self, ctx: &ApiContext<'_>, params: Params<'_>) -> Result<Vec<u8>> {
        let specs = super::validate_request(ctx, self.request(), params)?;

        let connected_timestamp = format_timestamp(truncate_to_hour(Utc::now())?);

        ctx.log_event(request_log_fields(
            ctx.config,
            "connected",
            ctx.geoip,
            params,
            specs,
        ));

        encode(&ConnectedResponse { connected_timestamp })
    }
}
