//! Parameter contract tables and the validation engine.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashSet;

use serde_json::json;

use tunnelapi_core::error::ApiError;
use tunnelapi_core::protocol::{Payload, RequestName};
use tunnelapi_gateway::params::registry::{
    base_params, connected_params, status_params, BASE_PARAMS,
};
use tunnelapi_gateway::params::{params_for, validate_params, ParamFlags};


#[test]
fn base_list_shape() {
    assert_eq!(BASE_PARAMS.len(), 17);
    assert_eq!(base_params()[0].name, "server_secret");

    let names: HashSet<_> = base_params().iter().map(|s| s.name).collect();
    assert_eq!(names.len(), 17, "names must be unique");

    let not_logged: Vec<_> = base_params().iter().filter(|s| !s.is_logged()).map(|s| s.name).collect();
    assert_eq!(not_logged, ["server_secret"]);

    let required: Vec<_> = base_params().iter().filter(|s| !s.is_optional()).map(|s| s.name).collect();
    assert_eq!(
        required,
        [
            "server_secret",
            "client_session_id",
            "propagation_channel_id",
            "sponsor_id",
            "client_version",
            "client_platform",
            "relay_protocol",
            "tunnel_whole_device",
        ]
    );
}

#[test]
fn request_lists_compose_base() {
    let connected = connected_params();
    assert_eq!(connected.len(), 18);
    assert_eq!(connected[0].name, "last_connected");
    assert!(!connected[0].is_optional());

    let status = status_params();
    assert_eq!(status.len(), 18);
    assert_eq!(status[0].name, "connected");
    assert!(!status[0].is_optional());

    for (a, b) in status[1..].iter().zip(base_params()) {
        assert_eq!(a.name, b.name);
    }

    assert_eq!(params_for(RequestName::Handshake).len(), 17);
    assert_eq!(params_for(RequestName::ClientVerification).len(), 17);
    assert!(std::ptr::eq(connected_params(), params_for(RequestName::Connected)));
}

#[test]
fn flags_are_independent_bits() {
    let both = ParamFlags::OPTIONAL | ParamFlags::NOT_LOGGED;
    assert!(both.contains(ParamFlags::OPTIONAL));
    assert!(both.contains(ParamFlags::NOT_LOGGED));
    assert!(!ParamFlags::OPTIONAL.contains(ParamFlags::NOT_LOGGED));
    assert!(ParamFlags::NONE.contains(ParamFlags::NONE));
    assert_eq!(format!("{both:?}"), r#"{"OPTIONAL", "NOT_LOGGED"}"#);
}

#[test]
fn engine_reports_first_failure_in_list_order() {
    let cfg = fixtures::api_config();

    // sponsor_id comes before client_version in the base list
    let v = fixtures::with(
        fixtures::base_params(),
        json!({ "sponsor_id": "zz", "client_version": "abc" }),
    );
    let p = Payload::from_value(v).unwrap();
    let err = validate_params(&cfg, p.params(), base_params()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidParam(n) if n == "sponsor_id"));
}

#[test]
fn engine_distinguishes_missing_mismatch_invalid() {
    let cfg = fixtures::api_config();

    let p = Payload::from_value(fixtures::without(fixtures::base_params(), "client_platform")).unwrap();
    let err = validate_params(&cfg, p.params(), base_params()).unwrap_err();
    assert!(matches!(err, ApiError::MissingParam(n) if n == "client_platform"));

    let p = Payload::from_value(fixtures::with(fixtures::base_params(), json!({ "client_version": 123 }))).unwrap();
    let err = validate_params(&cfg, p.params(), base_params()).unwrap_err();
    assert!(matches!(err, ApiError::TypeMismatch(n) if n == "client_version"));

    let p = Payload::from_value(fixtures::with(fixtures::base_params(), json!({ "tunnel_whole_device": "yes" }))).unwrap();
    let err = validate_params(&cfg, p.params(), base_params()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidParam(n) if n == "tunnel_whole_device"));
}

#[test]
fn engine_skips_absent_or_null_optionals() {
    let cfg = fixtures::api_config();

    let p = Payload::from_value(fixtures::base_params()).unwrap();
    validate_params(&cfg, p.params(), base_params()).unwrap();

    let p = Payload::from_value(fixtures::with(fixtures::base_params(), json!({ "device_region": null }))).unwrap();
    validate_params(&cfg, p.params(), base_params()).unwrap();

    // present optionals are still validated
    let p = Payload::from_value(fixtures::with(fixtures::base_params(), json!({ "device_region": "us" }))).unwrap();
    let err = validate_params(&cfg, p.params(), base_params()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidParam(n) if n == "device_region"));

    // a null required param is missing, not mismatched
    let p = Payload::from_value(fixtures::with(fixtures::base_params(), json!({ "sponsor_id": null }))).unwrap();
    let err = validate_params(&cfg, p.params(), base_params()).unwrap_err();
    assert!(matches!(err, ApiError::MissingParam(n) if n == "sponsor_id"));
}
