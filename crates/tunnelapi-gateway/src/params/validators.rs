//! Parameter validators.
//!
//! Every validator has the same shape, `fn(&ApiConfig, &str) -> bool`, so the
//! registry can reference them as plain function pointers. They are pure and
//! allocation-free apart from the lazily compiled timestamp pattern.

use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;
use subtle::ConstantTimeEq;

use crate::config::ApiConfig;

/// Constant-time comparison against the configured secret. Run time does not
/// depend on where the two values first differ.
pub fn is_server_secret(config: &ApiConfig, value: &str) -> bool {
    bool::from(value.as_bytes().ct_eq(config.server_secret.as_bytes()))
}

pub fn is_hex_digits(_: &ApiConfig, value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_hexdigit())
}

pub fn is_digits(_: &ApiConfig, value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

/// Any Unicode `White_Space` code point is rejected.
pub fn is_client_platform(_: &ApiConfig, value: &str) -> bool {
    !value.chars().any(char::is_whitespace)
}

pub fn is_relay_protocol(config: &ApiConfig, value: &str) -> bool {
    config.supported_relay_protocols.iter().any(|p| p == value)
}

pub fn is_server_entry_source(config: &ApiConfig, value: &str) -> bool {
    config.supported_server_entry_sources.iter().any(|s| s == value)
}

pub fn is_boolean_flag(_: &ApiConfig, value: &str) -> bool {
    value == "0" || value == "1"
}

pub fn is_region_code(_: &ApiConfig, value: &str) -> bool {
    value.len() == 2 && value.chars().all(|c| c.is_ascii_uppercase())
}

/// `<host>:<port>` where host is a domain or IP literal. Exactly one ':' is
/// allowed, so bracketed IPv6 literals never qualify.
pub fn is_dial_address(config: &ApiConfig, value: &str) -> bool {
    let mut parts = value.split(':');
    let (Some(host), Some(port), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    if !is_ip_address(config, host) && !is_domain(config, host) {
        return false;
    }
    if !is_digits(config, port) {
        return false;
    }
    match port.parse::<u32>() {
        Ok(port) => port > 0 && port < 65536,
        Err(_) => false,
    }
}

pub fn is_ip_address(_: &ApiConfig, value: &str) -> bool {
    value.parse::<IpAddr>().is_ok()
}

/// Each label: 1..=63 chars of `[A-Za-z0-9-]`, no leading or trailing '-'.
pub fn is_domain(_: &ApiConfig, value: &str) -> bool {
    let value = value.strip_suffix('.').unwrap_or(value);
    if value.len() > 255 {
        return false;
    }
    value.split('.').all(is_domain_label)
}

fn is_domain_label(label: &str) -> bool {
    (1..=63).contains(&label.len())
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// `<host>` or `<host>:<port>`.
pub fn is_host_header(config: &ApiConfig, value: &str) -> bool {
    if value.contains(':') {
        return is_dial_address(config, value);
    }
    is_ip_address(config, value) || is_domain(config, value)
}

// Syntax only: "2020-13-45T99:99:99Z" matches.
const ISO8601_PATTERN: &str = r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?(Z|[-+][0-9]{2}:[0-9]{2})$";

static ISO8601: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(ISO8601_PATTERN).ok());

pub fn is_iso8601_date(_: &ApiConfig, value: &str) -> bool {
    ISO8601.as_ref().is_some_and(|re| re.is_match(value))
}

pub fn is_last_connected(config: &ApiConfig, value: &str) -> bool {
    value == "None" || value == "Unknown" || is_iso8601_date(config, value)
}
