//! EcomPulse backend.
//!
//! Synthesizes storefront metrics on a timer and serves them as Prometheus
//! text (`/metrics`) and JSON (`/api/metrics`).

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use ecompulse_core::error::Result;
use ecompulse_server::{app_state::AppState, config, router, ticker::Ticker};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.client_code().as_str(), "ecompulse-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let state = AppState::new(config::load()?)?;
    let listen = state.cfg().server.listen_addr()?;
    let period = state.cfg().generator.tick_interval();

    let ticker = Ticker::start(state.store(), period);
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ecompulse_core::EcomPulseError::Internal(format!("bind {listen} failed: {e}")))?;

    tracing::info!(%listen, "backend server running");
    tracing::info!("prometheus metrics: http://{listen}/metrics");
    tracing::info!("json api: http://{listen}/api/metrics");
    tracing::info!("health check: http://{listen}/health");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    ticker.shutdown().await;
    served.map_err(|e| ecompulse_core::EcomPulseError::Internal(format!("server failed: {e}")))
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
    tracing::info!("shutdown signal received");
}
