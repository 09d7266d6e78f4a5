//! promgate server
//!
//! - `GET /`, `GET /health`, `GET /metrics`
//! - Per-request metrics: in-flight gauge, request counter, duration histogram
//! - Optional `promgate.yaml`; defaults bind 0.0.0.0:80

use tracing_subscriber::{fmt, EnvFilter};

use promgate_core::error::{PromgateError, Result};
use promgate_server::{app_state, config, router};

const CONFIG_PATH: &str = "promgate.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cfg = config::load_or_default(CONFIG_PATH)?;
    let listen = cfg.server.listen_addr()?;
    tracing::info!(title = %cfg.app.title, version = %cfg.app.version, "loaded config");

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "promgate-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| PromgateError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PromgateError::Internal(format!("server failed: {e}")))?;

    tracing::info!("promgate-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
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
