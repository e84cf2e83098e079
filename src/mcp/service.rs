//! MCP stdio service
//!
//! Runs a [`ZephyrServer`] over stdin/stdout until the host disconnects or
//! the process receives an interrupt or termination signal.

use miette::Diagnostic;
use rmcp::{ServiceExt, transport::stdio};
use thiserror::Error;
use tracing::info;

use crate::client::executor::ApiExecutor;

use super::server::ZephyrServer;

#[derive(Error, Diagnostic, Debug)]
pub enum ServeError {
    #[error("Failed to start MCP server: {0}")]
    #[diagnostic(code(zephyr_mcp::serve::start))]
    Start(String),

    #[error("MCP server task failed: {0}")]
    #[diagnostic(code(zephyr_mcp::serve::join))]
    Join(String),
}

/// Serve `server` on stdio.
///
/// Returns once the host closes the transport or a shutdown signal arrives.
/// On a signal the running service is cancelled.
pub async fn serve_stdio<E: ApiExecutor + 'static>(server: ZephyrServer<E>) -> Result<(), ServeError> {
    let running = server
        .serve(stdio())
        .await
        .map_err(|e| ServeError::Start(e.to_string()))?;

    info!("Zephyr Scale MCP server running on stdio");
    let cancel = running.cancellation_token();

    tokio::select! {
        reason = running.waiting() => {
            let reason = reason.map_err(|e| ServeError::Join(e.to_string()))?;
            info!(?reason, "MCP transport closed");
        }
        () = shutdown_signal() => {
            info!("Shutdown signal received, stopping MCP server");
            cancel.cancel();
        }
    }

    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(_) => {
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
