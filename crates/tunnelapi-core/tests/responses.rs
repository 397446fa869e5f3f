//! Response encoding and timestamp helpers.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chrono::{DateTime, Timelike, Utc};

use tunnelapi_core::protocol::response::encode;
use tunnelapi_core::protocol::timestamp::{
    current_timestamp, truncate_timestamp_to_hour, truncate_to_hour,
};
use tunnelapi_core::protocol::{ConnectedResponse, HandshakeResponse, RequestName};
use tunnelapi_core::ApiError;

#[test]
fn handshake_response_keeps_all_wire_fields() {
    let resp = HandshakeResponse {
        server_timestamp: "2020-01-02T03:04:05Z".into(),
        ..Default::default()
    };
    let bytes = encode(&resp).unwrap();

    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    for field in [
        "homepages",
        "upgrade_client_version",
        "page_view_regexes",
        "https_request_regexes",
        "encoded_server_list",
        "client_region",
        "server_timestamp",
    ] {
        assert!(v.get(field).is_some(), "missing field {field}");
    }

    let back: HandshakeResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(back, resp);
}

#[test]
fn connected_response_decodes_back() {
    let resp = ConnectedResponse {
        connected_timestamp: "2020-01-02T03:00:00Z".into(),
    };
    let back: ConnectedResponse = serde_json::from_slice(&encode(&resp).unwrap()).unwrap();
    assert_eq!(back, resp);
}

#[test]
fn truncation_zeroes_minutes_and_seconds() {
    assert_eq!(
        truncate_timestamp_to_hour("2020-01-02T03:04:05Z").unwrap(),
        "2020-01-02T03:00:00Z"
    );
    assert_eq!(
        truncate_timestamp_to_hour("2020-01-02T23:59:59.999Z").unwrap(),
        "2020-01-02T23:00:00Z"
    );
    // Offsets are normalized to UTC before truncating.
    assert_eq!(
        truncate_timestamp_to_hour("2020-01-02T03:04:05+01:30").unwrap(),
        "2020-01-02T01:00:00Z"
    );

    let err = truncate_timestamp_to_hour("yesterday").unwrap_err();
    assert!(matches!(err, ApiError::Internal(_)));
}

#[test]
fn current_timestamp_is_rfc3339_utc() {
    let now = current_timestamp();
    assert!(now.ends_with('Z'), "{now}");

    let parsed = DateTime::parse_from_rfc3339(&now).unwrap().with_timezone(&Utc);
    let hour = truncate_to_hour(parsed).unwrap();
    assert_eq!(hour.minute(), 0);
    assert_eq!(hour.second(), 0);
    assert_eq!(hour.nanosecond(), 0);
}

#[test]
fn request_names_round_trip() {
    for r in RequestName::ALL {
        assert_eq!(r.as_str().parse::<RequestName>().unwrap(), r);
    }
    let err = "Handshake".parse::<RequestName>().unwrap_err();
    assert!(matches!(err, ApiError::UnknownRequest(_)));
}
