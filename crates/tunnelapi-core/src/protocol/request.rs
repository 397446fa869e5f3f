//! Request names accepted on the control channel.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// Upper bound for a request body when the transport does not already bound it.
pub const MAX_API_PARAMS_SIZE: usize = 256 * 1024;

/// Control request kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestName {
    /// Sent right after a tunnel is established.
    Handshake,
    /// Sent once a tunnel is up and at least daily; drives unique-user stats.
    Connected,
    /// Periodic transfer and tunnel duration stats.
    Status,
    /// Client attestation (accepted, not checked).
    ClientVerification,
}

impl RequestName {
    pub const ALL: [RequestName; 4] = [
        RequestName::Handshake,
        RequestName::Connected,
        RequestName::Status,
        RequestName::ClientVerification,
    ];

    /// Wire name of the request.
    pub fn as_str(self) -> &'static str {
        match self {
            RequestName::Handshake => "handshake",
            RequestName::Connected => "connected",
            RequestName::Status => "status",
            RequestName::ClientVerification => "client-verification",
        }
    }
}

impl fmt::Display for RequestName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestName {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestName::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ApiError::UnknownRequest(s.to_string()))
    }
}
