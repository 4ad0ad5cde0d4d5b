//! pizzametrics collector host.
//!
//! - Loads config (`PIZZAMETRICS_CONFIG`, default `pizzametrics.yaml`)
//! - Starts the reporter loop against the configured ingestion endpoint
//! - Serves `/healthz` and `/v1/metrics` behind request tracking
//! - Ctrl-C / SIGTERM stops the reporter and drains the HTTP server

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use pizzametrics_collector::{app_state, config, report::Reporter, router};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!(code = e.code().as_str(), error = %e, "pizzametrics exiting");
        std::process::exit(1);
    }
}

async fn run() -> pizzametrics_core::Result<()> {
    let path = std::env::var(config::CONFIG_PATH_ENV)
        .unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path)?;
    tracing::info!(%path, metrics = ?cfg.metrics, "config loaded");

    let listen: SocketAddr = cfg.server.listen.parse().map_err(|e| {
        pizzametrics_core::PizzaMetricsError::Config(format!("server.listen: {e}"))
    })?;

    let state = app_state::AppState::new(cfg);
    let reporter = Arc::new(Reporter::from_config(state.collector(), &state.cfg().metrics)?);
    let reporter = reporter.spawn();

    let app = router::build_router(state);

    tracing::info!(%listen, "pizzametrics starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| pizzametrics_core::PizzaMetricsError::Internal(format!("bind {listen}: {e}")))?;

    let cancel = reporter.cancel_token();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            cancel.cancel();
        })
        .await
        .map_err(|e| pizzametrics_core::PizzaMetricsError::Internal(format!("server failed: {e}")))?;

    reporter.shutdown();
    reporter.stopped().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
