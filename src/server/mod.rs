// Server module entry point
// Listener creation, accept loop, connection serving and signal-driven shutdown

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the file is mounted as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_listener;
pub use server_loop::start_server_loop;

use std::sync::Arc;
use tokio::sync::Notify;

use crate::config::AppState;
use crate::logger;

/// Bind the configured address and serve until SIGINT/SIGTERM.
///
/// A bind failure is returned to the caller and is fatal; everything after
/// the bind is handled per connection.
pub async fn run(state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let addr = state.config.socket_addr()?;
    let listener = create_listener(addr).map_err(|e| {
        logger::log_error(&format!("Failed to bind {addr}: {e}"));
        e
    })?;

    let shutdown = Arc::new(Notify::new());
    signal::start_signal_handler(Arc::clone(&shutdown))?;

    logger::log_server_start(&listener.local_addr()?);
    start_server_loop(listener, state, shutdown).await;
    Ok(())
}
