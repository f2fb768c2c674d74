use crate::utils::error::{Result, ServiceError};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;

/// Bind `bind_address` and serve `router` until Ctrl+C or SIGTERM.
///
/// In-flight requests are allowed to finish; dropping a connection drops its
/// handler future together with any outbound call it is awaiting.
pub async fn serve(router: Router, bind_address: &str) -> Result<()> {
    let listener = TcpListener::bind(bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("HTTP server listening on {}", local_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
        .map_err(|e| ServiceError::ServerError {
            message: e.to_string(),
        })?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn wait_for_shutdown() {
    tokio::select! {
        _ = wait_ctrl_c() => {},
        _ = wait_sigterm() => {},
    }
    tracing::info!("Shutdown signal received, draining connections");
}

async fn wait_ctrl_c() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(%e, "Error handling Ctrl+C signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn wait_sigterm() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut handler) => {
            handler.recv().await;
        }
        Err(e) => {
            tracing::error!(%e, "Failed to install SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_sigterm() {
    std::future::pending::<()>().await
}
