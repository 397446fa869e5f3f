use std::collections::BTreeMap;

use tunnelapi_core::error::Result;
use tunnelapi_core::protocol::{Params, RequestName};

use crate::context::ApiContext;
use crate::dispatch::ApiHandler;
use crate::obs::{request_log_fields, LogFields};

/// Clients report tunnel durations in nanoseconds; events carry milliseconds.
const NANOS_PER_MILLI: i64 = 1_000_000;

/// `status`: periodic transfer and tunnel duration stats.
///
/// Emits one `bytes_transferred` event, one `domain_bytes` event per host and
/// one `session` event per tunnel. The whole `statusData` object is extracted
/// before anything is logged, so a malformed payload emits no events.
#[derive(Debug, Default)]
pub struct StatusHandler;

impl StatusHandler {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug)]
struct StatusData {
    bytes_transferred: i64,
    host_bytes: BTreeMap<String, i64>,
    tunnel_stats: Vec<TunnelStat>,
}

#[derive(Debug)]
struct TunnelStat {
    session_id: String,
    tunnel_number: i64,
    tunnel_server_ip_address: String,
    server_handshake_timestamp: String,
    duration_nanos: i64,
    total_bytes_sent: i64,
    total_bytes_received: i64,
}

impl StatusData {
    fn extract(params: Params<'_>) -> Result<Self> {
        let status = params.get_object("statusData")?;

        let tunnel_stats = status
            .get_object_array("tunnel_stats")?
            .into_iter()
            .map(TunnelStat::extract)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            bytes_transferred: status.get_i64("bytes_transferred")?,
            host_bytes: status.get_i64_map("host_bytes")?,
            tunnel_stats,
        })
    }
}

impl TunnelStat {
    fn extract(stat: Params<'_>) -> Result<Self> {
        Ok(Self {
            session_id: stat.get_str("session_id")?.to_string(),
            tunnel_number: stat.get_i64("tunnel_number")?,
            tunnel_server_ip_address: stat.get_str("tunnel_server_ip_address")?.to_string(),
            server_handshake_timestamp: stat.get_str("server_handshake_timestamp")?.to_string(),
            duration_nanos: stat.get_i64("duration")?,
            total_bytes_sent: stat.get_i64("total_bytes_sent")?,
            total_bytes_received: stat.get_i64("total_bytes_received")?,
        })
    }

    fn log_into(&self, fields: &mut LogFields) {
        fields.insert("session_id", self.session_id.as_str());
        fields.insert("tunnel_number", self.tunnel_number);
        fields.insert("tunnel_server_ip_address", self.tunnel_server_ip_address.as_str());
        fields.insert("server_handshake_timestamp", self.server_handshake_timestamp.as_str());
        fields.insert("duration", self.duration_nanos / NANOS_PER_MILLI);
        fields.insert("total_bytes_sent", self.total_bytes_sent);
        fields.insert("total_bytes_received", self.total_bytes_received);
    }
}

impl ApiHandler for StatusHandler {
    fn request(&self) -> RequestName {
        RequestName::Status
    }

    fn handle(&self, ctx: &ApiContext<'_>, params: Params<'_>) -> Result<Vec<u8>> {
        let specs = super::validate_request(ctx, self.request(), params)?;

        let data = StatusData::extract(params).inspect_err(|e| {
            tracing::debug!(request = %self.request(), error = %e, "statusData rejected");
        })?;

        let event = |name: &str| request_log_fields(ctx.config, name, ctx.geoip, params, specs);

        let mut fields = event("bytes_transferred");
        fields.insert("bytes", data.bytes_transferred);
        ctx.log_event(fields);

        for (domain, bytes) in &data.host_bytes {
            let mut fields = event("domain_bytes");
            fields.insert("domain", domain.as_str());
            fields.insert("bytes", *bytes);
            ctx.log_event(fields);
        }

        for stat in &data.tunnel_stats {
            let mut fields = event("session");
            stat.log_into(&mut fields);
            ctx.log_event(fields);
        }

        Ok(Vec::new())
    }
}
