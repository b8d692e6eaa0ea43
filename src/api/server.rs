//! Listener lifecycle for the HTTP server.

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Serves `router` on `listener` until Ctrl-C is received.
///
/// In-flight requests are allowed to finish before the call returns.
///
/// # Errors
///
/// Returns an I/O error when the listener fails.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "task API listening");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
