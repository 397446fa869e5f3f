//! Response shapes.
//!
//! Field names are part of the client contract. `status` and
//! `client-verification` answer with an empty byte body, not an empty JSON
//! value, so they have no type here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Response to `handshake`.
///
/// Only `server_timestamp` is populated by this server; the remaining fields
/// keep their wire presence with empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakeResponse {
    pub homepages: Vec<String>,
    pub upgrade_client_version: String,
    pub page_view_regexes: Vec<BTreeMap<String, String>>,
    pub https_request_regexes: Vec<BTreeMap<String, String>>,
    pub encoded_server_list: Vec<String>,
    pub client_region: String,
    pub server_timestamp: String,
}

/// Response to `connected`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedResponse {
    /// Current time truncated to the hour; clients echo it back as
    /// `last_connected`.
    pub connected_timestamp: String,
}

/// Encode a response value to its wire bytes.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| ApiError::Internal(format!("json encode failed: {e}")))
}
