//! tunnelapi gateway binary.
//!
//! - Loads `tunnelapi.yaml` (or the path in `TUNNELAPI_CONFIG`)
//! - Serves the control-channel API over HTTP with client addresses attached
//! - Analytics events go to tracing target `api_event`

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use tunnelapi_gateway::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("TUNNELAPI_CONFIG").unwrap_or_else(|_| "tunnelapi.yaml".into());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .map_err(|e| format!("server.listen must be a valid SocketAddr: {e}"))?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "tunnelapi-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
