//! metricsx server binary.
//!
//! Loads `metricsx.yaml` (or `$METRICSX_CONFIG`), serves `/metrics` and
//! `/health`, and runs the periodic reporter until ctrl-c.

use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

use metricsx_core::error::{MetricsError, Result};
use metricsx_server::{app_state::AppState, config, reporter::Reporter, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(code = e.code().as_str(), error = %e, "metricsx-server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = config::config_path();
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;
    let report_interval = cfg.metrics.report_interval();

    let state = AppState::new(cfg)?;
    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);

    let reporter = report_interval.map(|interval| {
        tracing::info!(interval_ms = interval.as_millis() as u64, "reporter enabled");
        Reporter::new(state.metrics().clone(), interval).spawn(shutdown_rx)
    });

    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "metricsx-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MetricsError::Internal(format!("bind {listen} failed: {e}")))?;

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MetricsError::Internal(format!("server failed: {e}")));

    // stop the reporter even when serving failed
    let _ = shutdown_tx.send(());
    if let Some(handle) = reporter {
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "reporter task ended abnormally");
        }
    }

    tracing::info!("metricsx-server stopped");
    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
