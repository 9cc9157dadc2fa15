use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};
use waktu_core::config::CoreConfig;
use waktu_core::errors::WaktuError;
use waktu_core::logging;
use waktu_service::{PgRecordGateway, WaktuApiBuilder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(err) = logging::init_tracing(None) {
        eprintln!("⚠️ failed to initialise tracing: {err}");
    }

    let config = load_waktu_config().context("failed to load waktu configuration")?;
    let addr: SocketAddr = config
        .http_bind
        .parse()
        .context("invalid bind address")?;

    let gateway = PgRecordGateway::from_config(&config)
        .await
        .context("failed to connect to the record store")?;
    let app = WaktuApiBuilder::new(Arc::new(gateway)).into_router();

    let listener = TcpListener::bind(addr)
        .await
        .context("failed to bind TCP listener")?;
    let actual_addr = listener
        .local_addr()
        .context("failed to read socket address")?;
    info!(%actual_addr, environment = ?config.environment, "starting waktu service");

    if let Err(err) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(?err, "waktu service terminated with error");
    }

    Ok(())
}

fn load_waktu_config() -> Result<CoreConfig, WaktuError> {
    Ok(CoreConfig::from_env_with_fallback("WAKTU_")?)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sigterm) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sigterm.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
