//! Analytics event fields under the legacy naming rules.
//!
//! Field and event names are consumed by existing stats aggregation and must
//! not change. Numeric fields are recorded as integers, everything else as
//! strings.

use std::collections::BTreeMap;

use serde::Serialize;
use tunnelapi_core::protocol::Params;

use crate::config::ApiConfig;
use crate::context::GeoIpData;
use crate::params::validators::is_ip_address;
use crate::params::ParamSpec;

/// Scalar log value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LogValue {
    Str(String),
    Int(i64),
}

impl From<&str> for LogValue {
    fn from(v: &str) -> Self {
        LogValue::Str(v.to_string())
    }
}

impl From<String> for LogValue {
    fn from(v: String) -> Self {
        LogValue::Str(v)
    }
}

impl From<i64> for LogValue {
    fn from(v: i64) -> Self {
        LogValue::Int(v)
    }
}

/// Named field set for one analytics event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LogFields(BTreeMap<String, LogValue>);

impl LogFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<LogValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&LogValue> {
        self.0.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(LogValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.0.get(name) {
            Some(LogValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn event_name(&self) -> Option<&str> {
        self.get_str("event_name")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LogValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Build the common fields for an API event.
///
/// Expects `params` to have passed `validate_params` against `specs`; values
/// that are absent or not strings are skipped rather than reported.
pub fn request_log_fields(
    config: &ApiConfig,
    event_name: &str,
    geoip: &GeoIpData,
    params: Params<'_>,
    specs: &[ParamSpec],
) -> LogFields {
    let mut fields = LogFields::new();

    fields.insert("event_name", event_name);
    fields.insert("host_id", config.host_id.as_str());

    // Spaces were field delimiters in the legacy log format; stats aggregation
    // still expects the underscores.
    fields.insert("client_region", geoip.country.replace(' ', "_"));
    fields.insert("client_city", geoip.city.replace(' ', "_"));
    fields.insert("client_isp", geoip.isp.replace(' ', "_"));

    for spec in specs.iter().filter(|s| s.is_logged()) {
        let Some(value) = params.get(spec.name).and_then(|v| v.as_str()) else {
            continue;
        };

        match spec.name {
            "client_version" => {
                fields.insert(spec.name, value.parse::<i64>().unwrap_or(0));
            }
            "meek_dial_address" => {
                let host = split_host(value);
                if is_ip_address(config, host) {
                    fields.insert("meek_dial_ip_address", host);
                } else {
                    fields.insert("meek_dial_domain", host);
                }
            }
            "meek_host_header" => {
                fields.insert(spec.name, split_host(value));
            }
            _ => {
                fields.insert(spec.name, value);
            }
        }
    }

    fields
}

/// Host part of `host:port`; the whole value when there is no port.
fn split_host(value: &str) -> &str {
    value.split_once(':').map_or(value, |(host, _)| host)
}
