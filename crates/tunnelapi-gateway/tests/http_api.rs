//! HTTP surface: status codes, bodies, ops endpoints.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::connect_info::MockConnectInfo,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use tunnelapi_core::protocol::HandshakeResponse;
use tunnelapi_gateway::app_state::AppState;
use tunnelapi_gateway::config;
use tunnelapi_gateway::context::{GeoIpData, GeoIpResolver};
use tunnelapi_gateway::obs::MemorySink;
use tunnelapi_gateway::router::build_router;


struct FixedGeoIp;

impl GeoIpResolver for FixedGeoIp {
    fn lookup(&self, _ip: IpAddr) -> GeoIpData {
        fixtures::geoip()
    }
}

fn state_with(yaml: &str) -> (AppState, Arc<MemorySink>) {
    let cfg = config::load_from_str(yaml).unwrap();
    let sink = Arc::new(MemorySink::new());
    let state = AppState::with_collaborators(cfg, Arc::new(FixedGeoIp), sink.clone()).unwrap();
    (state, sink)
}

fn router(state: AppState) -> Router {
    let peer: SocketAddr = "203.0.113.5:40000".parse().unwrap();
    build_router(state).layer(MockConnectInfo(peer))
}

fn app() -> (Router, Arc<MemorySink>) {
    let (state, sink) = state_with(fixtures::CONFIG_YAML);
    (router(state), sink)
}

fn requests(state: &AppState, request: &str, outcome: &str) -> u64 {
    state
        .metrics()
        .requests
        .get(&[("request", request), ("outcome", outcome)])
}

fn post(name: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/v1/api/{name}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn post_json(name: &str, payload: &Value) -> Request<Body> {
    post(name, serde_json::to_vec(payload).unwrap())
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn handshake_returns_json() {
    let (app, sink) = app();

    let resp = app.oneshot(post_json("handshake", &fixtures::base_params())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let body = body_string(resp).await;
    let hs: HandshakeResponse = serde_json::from_str(&body).unwrap();
    assert!(!hs.server_timestamp.is_empty());

    let events = sink.events_named("handshake");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].get_str("client_city"), Some("New_York"));
}

#[tokio::test]
async fn status_returns_empty_body() {
    let (app, sink) = app();

    let resp = app.oneshot(post_json("status", &fixtures::status_params())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.is_empty());
    assert_eq!(sink.events_named("domain_bytes").len(), 2);
}

#[tokio::test]
async fn invalid_params_is_400() {
    let (app, sink) = app();
    let payload = fixtures::with(fixtures::base_params(), json!({ "server_secret": "wrong" }));

    let resp = app.oneshot(post_json("handshake", &payload)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(resp).await, "INVALID_PARAMS");
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn malformed_json_is_400() {
    let (app, _) = app();

    let resp = app.oneshot(post("handshake", "{not json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(resp).await, "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_request_is_404() {
    let (app, _) = app();

    let resp = app.oneshot(post_json("routes", &fixtures::base_params())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(resp).await, "UNKNOWN_REQUEST");
}

#[tokio::test]
async fn oversized_body_is_413() {
    let yaml = r#"
version: 1
server:
  max_request_bytes: 64
api:
  host_id: "test-host"
  server_secret: "0123456789abcdef"
"#;
    let (state, sink) = state_with(yaml);

    let resp = router(state.clone())
        .oneshot(post_json("handshake", &fixtures::base_params()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_string(resp).await, "PAYLOAD_TOO_LARGE");
    assert!(sink.events().is_empty());
    assert_eq!(requests(&state, "handshake", "PAYLOAD_TOO_LARGE"), 1);
    assert_eq!(requests(&state, "handshake", "ok"), 0);
}

#[tokio::test]
async fn body_at_ceiling_is_dispatched() {
    let body = serde_json::to_vec(&fixtures::base_params()).unwrap();
    let yaml = format!(
        "version: 1\nserver:\n  max_request_bytes: {}\napi:\n  host_id: test-host\n  server_secret: \"0123456789abcdef\"\n",
        body.len()
    );
    let (state, _) = state_with(&yaml);

    let resp = router(state.clone()).oneshot(post("handshake", body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(requests(&state, "handshake", "ok"), 1);
}

#[tokio::test]
async fn healthz_ok() {
    let (app, _) = app();

    let req = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "ok");
}

#[tokio::test]
async fn metrics_count_outcomes() {
    let (state, sink) = state_with(fixtures::CONFIG_YAML);
    let app = router(state.clone());

    for _ in 0..2 {
        let ok = app
            .clone()
            .oneshot(post_json("handshake", &fixtures::base_params()))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
    }
    assert_eq!(sink.events_named("handshake").len(), 2);
    sink.clear();

    let bad = app
        .clone()
        .oneshot(post_json("no-such-request", &json!({})))
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::NOT_FOUND);
    assert!(sink.events().is_empty());

    assert_eq!(requests(&state, "handshake", "ok"), 2);
    assert_eq!(requests(&state, "unknown", "UNKNOWN_REQUEST"), 1);
    assert_eq!(requests(&state, "no-such-request", "UNKNOWN_REQUEST"), 0);

    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let body = body_string(app.oneshot(req).await.unwrap()).await;
    assert!(body.starts_with("# TYPE tunnelapi_requests_total counter\n"));
    assert!(body.contains(r#"tunnelapi_requests_total{outcome="ok",request="handshake"} 2"#));
}
