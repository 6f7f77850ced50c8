//! Shutdown signal handling.

use tokio::sync::broadcast;
use tracing::{info, warn};

/// Sets up a shutdown signal handler for Ctrl+C and, on Unix, SIGTERM.
pub fn setup_shutdown_handler() -> broadcast::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    tokio::spawn(async move {
        match wait_for_signal().await {
            Ok(name) => info!("Received {name}, stopping producer"),
            Err(e) => {
                // Without a handler the process can still be killed; keep running.
                warn!("Failed to install signal handler: {e}");
                return;
            }
        }
        let _ = shutdown_tx.send(());
    });

    shutdown_rx
}

/// Resolve once a shutdown has been requested.
///
/// A closed channel means no shutdown can ever arrive, so this never
/// resolves in that case.
pub async fn shutdown_requested(shutdown: &mut broadcast::Receiver<()>) {
    match shutdown.recv().await {
        Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {}
        Err(broadcast::error::RecvError::Closed) => std::future::pending::<()>().await,
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|_| "interrupt signal (Ctrl+C)"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("interrupt signal (Ctrl+C)")
}
