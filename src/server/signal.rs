// Signal handling module
//
// SIGINT (Ctrl+C) and SIGTERM both stop the accept loop. There is no reload.

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Spawn a task that fires `shutdown` on the first SIGINT or SIGTERM
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => logger::log_shutdown("SIGTERM received"),
            _ = sigint.recv() => logger::log_shutdown("SIGINT received"),
        }
        shutdown.notify_one();
    });
    Ok(())
}

/// Non-Unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) -> std::io::Result<()> {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_shutdown("Ctrl+C received");
            shutdown.notify_one();
        }
    });
    Ok(())
}
