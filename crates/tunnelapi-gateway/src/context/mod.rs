//! Per-request context shared by the dispatcher and handlers.
//!
//! The context only borrows: config and sink are process-wide, GeoIP data is
//! resolved by the transport before dispatch.

pub mod geoip;

pub use geoip::{GeoIpData, GeoIpResolver, UnknownGeoIp};

use crate::config::ApiConfig;
use crate::obs::{LogFields, LogSink};

/// Everything a handler may read besides the payload itself.
#[derive(Clone, Copy)]
pub struct ApiContext<'a> {
    pub config: &'a ApiConfig,
    pub geoip: &'a GeoIpData,
    pub sink: &'a dyn LogSink,
}

impl<'a> ApiContext<'a> {
    pub fn new(config: &'a ApiConfig, geoip: &'a GeoIpData, sink: &'a dyn LogSink) -> Self {
        Self { config, geoip, sink }
    }

    /// Emit one analytics event.
    pub fn log_event(&self, fields: LogFields) {
        self.sink.emit(fields);
    }
}
