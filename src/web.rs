use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::config::StatewatchConfig;

/// Full application router: `/api/*`, `/health`, optional static frontend
pub fn app(state: Arc<AppState>, static_dir: Option<&str>) -> Router {
    let mut app = Router::new()
        .nest("/api", api::router())
        .route("/health", get(api::get_health))
        .with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    with_layers(app)
}

/// Panic guard, request tracing and permissive CORS around `router`
fn with_layers(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error", "available": false })),
    )
        .into_response()
}

pub async fn run(config: &StatewatchConfig) -> Result<()> {
    let state = Arc::new(AppState::from_config(config).context("Failed to build services")?);
    let app = app(state, config.server.static_dir.as_deref());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.server.host))?;

    if let (Some(cert), Some(key)) = (&config.server.tls_cert_path, &config.server.tls_key_path) {
        return serve_tls(addr, app, cert, key).await;
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    Ok(())
}

#[cfg(feature = "tls")]
async fn serve_tls(addr: SocketAddr, app: Router, cert: &str, key: &str) -> Result<()> {
    let tls = axum_server::tls_rustls::RustlsConfig::from_pem_file(cert, key)
        .await
        .context("Failed to load TLS certificate")?;
    tracing::info!("Web server running at https://{}", addr);
    axum_server::bind_rustls(addr, tls)
        .serve(app.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}

#[cfg(not(feature = "tls"))]
async fn serve_tls(_addr: SocketAddr, _app: Router, _cert: &str, _key: &str) -> Result<()> {
    anyhow::bail!("TLS paths configured but statewatch was built without the `tls` feature")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
