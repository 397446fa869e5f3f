//! Declarative parameter contracts per request kind.
//!
//! The lists are built once per process and only ever read afterwards.
//! List order decides which failure is reported first, nothing else.

use std::fmt;
use std::ops::BitOr;
use std::sync::LazyLock;

use tunnelapi_core::protocol::RequestName;

use crate::config::ApiConfig;

use super::validators::{
    is_boolean_flag, is_client_platform, is_dial_address, is_digits, is_domain, is_hex_digits,
    is_host_header, is_ip_address, is_iso8601_date, is_last_connected, is_region_code,
    is_relay_protocol, is_server_entry_source, is_server_secret,
};

/// Independent per-parameter flag bits.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ParamFlags(u8);

impl ParamFlags {
    pub const NONE: ParamFlags = ParamFlags(0);
    /// Absence is not an error.
    pub const OPTIONAL: ParamFlags = ParamFlags(1 << 0);
    /// Never copied into analytics events.
    pub const NOT_LOGGED: ParamFlags = ParamFlags(1 << 1);

    pub const fn contains(self, other: ParamFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: ParamFlags) -> ParamFlags {
        ParamFlags(self.0 | other.0)
    }
}

impl BitOr for ParamFlags {
    type Output = ParamFlags;

    fn bitor(self, rhs: ParamFlags) -> ParamFlags {
        self.union(rhs)
    }
}

impl fmt::Debug for ParamFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        if self.contains(ParamFlags::OPTIONAL) {
            set.entry(&"OPTIONAL");
        }
        if self.contains(ParamFlags::NOT_LOGGED) {
            set.entry(&"NOT_LOGGED");
        }
        set.finish()
    }
}

pub type Validator = fn(&ApiConfig, &str) -> bool;

/// One expected request parameter.
#[derive(Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub validator: Validator,
    pub flags: ParamFlags,
}

impl ParamSpec {
    pub const fn new(name: &'static str, validator: Validator, flags: ParamFlags) -> Self {
        Self { name, validator, flags }
    }

    pub const fn required(name: &'static str, validator: Validator) -> Self {
        Self::new(name, validator, ParamFlags::NONE)
    }

    pub const fn optional(name: &'static str, validator: Validator) -> Self {
        Self::new(name, validator, ParamFlags::OPTIONAL)
    }

    pub fn is_optional(&self) -> bool {
        self.flags.contains(ParamFlags::OPTIONAL)
    }

    pub fn is_logged(&self) -> bool {
        !self.flags.contains(ParamFlags::NOT_LOGGED)
    }
}

impl fmt::Debug for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSpec")
            .field("name", &self.name)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// Parameters common to every request (legacy common + optional common inputs).
pub static BASE_PARAMS: [ParamSpec; 17] = [
    ParamSpec::new("server_secret", is_server_secret, ParamFlags::NOT_LOGGED),
    ParamSpec::required("client_session_id", is_hex_digits),
    ParamSpec::required("propagation_channel_id", is_hex_digits),
    ParamSpec::required("sponsor_id", is_hex_digits),
    ParamSpec::required("client_version", is_digits),
    ParamSpec::required("client_platform", is_client_platform),
    ParamSpec::required("relay_protocol", is_relay_protocol),
    ParamSpec::required("tunnel_whole_device", is_boolean_flag),
    ParamSpec::optional("device_region", is_region_code),
    ParamSpec::optional("meek_dial_address", is_dial_address),
    ParamSpec::optional("meek_resolved_ip_address", is_ip_address),
    ParamSpec::optional("meek_sni_server_name", is_domain),
    ParamSpec::optional("meek_host_header", is_host_header),
    ParamSpec::optional("meek_transformed_host_name", is_boolean_flag),
    ParamSpec::optional("server_entry_region", is_region_code),
    ParamSpec::optional("server_entry_source", is_server_entry_source),
    ParamSpec::optional("server_entry_timestamp", is_iso8601_date),
];

static CONNECTED_PARAMS: LazyLock<Vec<ParamSpec>> =
    LazyLock::new(|| with_base(&[ParamSpec::required("last_connected", is_last_connected)]));

static STATUS_PARAMS: LazyLock<Vec<ParamSpec>> =
    LazyLock::new(|| with_base(&[ParamSpec::required("connected", is_boolean_flag)]));

fn with_base(extra: &[ParamSpec]) -> Vec<ParamSpec> {
    extra.iter().chain(BASE_PARAMS.iter()).copied().collect()
}

pub fn base_params() -> &'static [ParamSpec] {
    &BASE_PARAMS
}

pub fn connected_params() -> &'static [ParamSpec] {
    &CONNECTED_PARAMS
}

pub fn status_params() -> &'static [ParamSpec] {
    &STATUS_PARAMS
}

/// Contract for a request kind.
pub fn params_for(request: RequestName) -> &'static [ParamSpec] {
    match request {
        RequestName::Handshake | RequestName::ClientVerification => base_params(),
        RequestName::Connected => connected_params(),
        RequestName::Status => status_params(),
    }
}
