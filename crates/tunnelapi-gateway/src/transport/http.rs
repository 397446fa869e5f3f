//! HTTP transport for control requests.
//!
//! `POST /v1/api/:name` with the JSON params as body. The body ceiling is
//! enforced by the router (`DefaultBodyLimit`); the resulting extractor
//! rejection is mapped here so oversized requests get the same client-code
//! body and are counted like any other failure.

use std::net::SocketAddr;

use axum::{
    extract::{rejection::BytesRejection, ConnectInfo, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use tunnelapi_core::error::{ApiError, ClientCode, Result};

use crate::app_state::AppState;

pub async fn api_request(
    State(app): State<AppState>,
    Path(name): Path<String>,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let res = match read_body(&app, body) {
        Ok(body) => {
            let peer_ip = peer.map(|ConnectInfo(addr)| addr.ip());
            app.handle_request(&name, peer_ip, &body)
        }
        Err(e) => {
            app.record_outcome(&name, Some(&e));
            Err(e)
        }
    };

    match res {
        Ok(out) if out.is_empty() => StatusCode::OK.into_response(),
        Ok(out) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            out,
        )
            .into_response(),
        Err(e) => {
            tracing::debug!(request = %name, error = %e, "api request failed");
            error_response(&e)
        }
    }
}

fn read_body(app: &AppState, body: std::result::Result<Bytes, BytesRejection>) -> Result<Bytes> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::Decode(rejection.body_text())
        }
    })?;

    if body.len() > app.cfg().server.max_request_bytes {
        return Err(ApiError::PayloadTooLarge);
    }
    Ok(body)
}

fn error_response(e: &ApiError) -> Response {
    let code = e.client_code();
    (status_for(code), code.as_str()).into_response()
}

fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::BadRequest | ClientCode::InvalidParams | ClientCode::UnsupportedVersion => {
            StatusCode::BAD_REQUEST
        }
        ClientCode::UnknownRequest => StatusCode::NOT_FOUND,
        ClientCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
