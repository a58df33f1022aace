use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use ws_config::WsConfig;
use ws_notify::{Notifier, WebhookClient};
use ws_server::{AppState, build_router};

use super::open_workbook;

/// Upper bound on waiting for queued webhooks at shutdown.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn handle(config: WsConfig, bind: Option<String>, in_memory: bool) -> anyhow::Result<()> {
    if config.workshops.is_empty() {
        tracing::warn!("no workshops configured, every request will 404");
    }

    let workbook = open_workbook(&config, in_memory)?;
    let webhook =
        WebhookClient::new(&config.webhook).context("failed to initialize webhook client")?;
    let (notifier, worker) = Notifier::spawn(Arc::new(webhook), config.server.notify_queue);

    let addr = bind.unwrap_or_else(|| config.server.bind.clone());
    let app = build_router(AppState::new(config, workbook, notifier));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    tracing::info!(%addr, "wsreg listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // The router and every notifier handle are gone; the queue is closed.
    worker.drain(DRAIN_TIMEOUT).await;
    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received terminate signal, shutting down"),
    }
}
