//! Shared application state for the tunnelapi gateway.
//!
//! Everything here is built once at startup and read-only afterwards; the
//! only mutable pieces are the atomic request counters.

use std::net::IpAddr;
use std::sync::Arc;

use tunnelapi_core::error::{ApiError, Result};
use tunnelapi_core::protocol::RequestName;

use crate::config::ServerConfig;
use crate::context::{ApiContext, GeoIpData, GeoIpResolver, UnknownGeoIp};
use crate::dispatch::Dispatcher;
use crate::obs::{ApiMetrics, LogSink, TracingSink};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    dispatcher: Dispatcher,
    geoip: Arc<dyn GeoIpResolver>,
    sink: Arc<dyn LogSink>,
    metrics: ApiMetrics,
}

impl AppState {
    /// State with the default collaborators: no GeoIP database, events to tracing.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        Self::with_collaborators(cfg, Arc::new(UnknownGeoIp), Arc::new(TracingSink))
    }

    pub fn with_collaborators(
        cfg: ServerConfig,
        geoip: Arc<dyn GeoIpResolver>,
        sink: Arc<dyn LogSink>,
    ) -> Result<Self> {
        cfg.validate()?;

        let dispatcher = Dispatcher::with_builtin_handlers();

        // every request kind must have a handler
        let registered = dispatcher.registered();
        if let Some(missing) = RequestName::ALL.iter().find(|r| !registered.contains(r)) {
            return Err(ApiError::Internal(format!(
                "no handler registered for request: {missing}"
            )));
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                dispatcher,
                geoip,
                sink,
                metrics: ApiMetrics::default(),
            }),
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    pub fn metrics(&self) -> &ApiMetrics {
        &self.inner.metrics
    }

    pub fn resolve_geoip(&self, peer: Option<IpAddr>) -> GeoIpData {
        peer.map(|ip| self.inner.geoip.lookup(ip))
            .unwrap_or_else(GeoIpData::unknown)
    }

    /// Run one control request end to end (GeoIP, dispatch, counters).
    pub fn handle_request(&self, name: &str, peer: Option<IpAddr>, payload: &[u8]) -> Result<Vec<u8>> {
        let geoip = self.resolve_geoip(peer);
        let ctx = ApiContext::new(self.cfg().api_config(), &geoip, self.inner.sink.as_ref());

        let res = self.dispatcher().dispatch(&ctx, name, payload);
        self.record_outcome(name, res.as_ref().err());
        res
    }

    /// Count one request outcome (`None` is success), including requests
    /// rejected before dispatch.
    pub fn record_outcome(&self, name: &str, err: Option<&ApiError>) {
        // unknown names are collapsed so clients cannot grow the label set
        let label = name
            .parse::<RequestName>()
            .map(RequestName::as_str)
            .unwrap_or("unknown");
        let outcome = err.map_or("ok", |e| e.client_code().as_str());
        self.metrics().record(label, outcome);
    }
}
