use serde::Deserialize;
use tunnelapi_core::error::{ApiError, Result};
use tunnelapi_core::protocol::MAX_API_PARAMS_SIZE;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    pub api: ApiConfig,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ApiError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.api.validate()?;

        Ok(())
    }

    pub fn api_config(&self) -> &ApiConfig {
        &self.api
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_API_PARAMS_SIZE).contains(&self.max_request_bytes) {
            return Err(ApiError::Config(format!(
                "server.max_request_bytes must be between 1 and {MAX_API_PARAMS_SIZE}"
            )));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8443".into()
}
fn default_max_request_bytes() -> usize {
    MAX_API_PARAMS_SIZE
}

/// Settings read by the validators and the log-field builder.
/// Immutable once loaded; shared by every request.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Stamped on every analytics event as `host_id`.
    pub host_id: String,

    /// Shared secret clients present as `server_secret`.
    pub server_secret: String,

    #[serde(default = "default_relay_protocols")]
    pub supported_relay_protocols: Vec<String>,

    #[serde(default = "default_server_entry_sources")]
    pub supported_server_entry_sources: Vec<String>,
}

impl ApiConfig {
    /// Config with the default allow-lists.
    pub fn new(host_id: impl Into<String>, server_secret: impl Into<String>) -> Self {
        Self {
            host_id: host_id.into(),
            server_secret: server_secret.into(),
            supported_relay_protocols: default_relay_protocols(),
            supported_server_entry_sources: default_server_entry_sources(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.host_id.is_empty() {
            return Err(ApiError::Config("api.host_id must not be empty".into()));
        }
        if self.server_secret.is_empty() {
            return Err(ApiError::Config("api.server_secret must not be empty".into()));
        }
        if self.supported_relay_protocols.is_empty() {
            return Err(ApiError::Config(
                "api.supported_relay_protocols must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_relay_protocols() -> Vec<String> {
    [
        "SSH",
        "OSSH",
        "UNFRONTED-MEEK-OSSH",
        "UNFRONTED-MEEK-HTTPS-OSSH",
        "FRONTED-MEEK-OSSH",
        "FRONTED-MEEK-HTTP-OSSH",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_server_entry_sources() -> Vec<String> {
    ["EMBEDDED", "REMOTE", "DISCOVERY", "TARGET"]
        .into_iter()
        .map(String::from)
        .collect()
}
