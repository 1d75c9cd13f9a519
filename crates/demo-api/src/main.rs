//! `demo-api` — binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables and `.env`.
//! 2. Initialise the tracing subscriber (format follows `NODE_ENV`).
//! 3. Generate the API documentation from the route table.
//! 4. Build the Axum router and serve until SIGINT/SIGTERM.

mod config;
mod docs;
mod server;
mod telemetry;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;

use config::Config;
use docs::ApiDocs;
use server::{routes::ROUTES, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(&cfg.log_level, cfg.node_env)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = %cfg.node_env,
        port = cfg.port,
        "demo-api starting"
    );

    // -----------------------------------------------------------------------
    // 3. API documentation
    // -----------------------------------------------------------------------
    let docs = ApiDocs::generate(ROUTES);

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(cfg.node_env, docs);
    let router = server::router::build(state);

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server error")?;

    info!("demo-api stopped");
    Ok(())
}

/// Resolve on the first SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    info!("shutdown signal received");
}
