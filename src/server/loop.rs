// Server loop module
// Accepts connections until a shutdown is requested

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::handle_connection;
use crate::config::AppState;
use crate::logger;

/// Accept connections on `listener` until `shutdown` is notified.
///
/// Accept errors are logged and the loop keeps going. The listener is dropped,
/// releasing the port, when this returns.
pub async fn start_server_loop(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => break,
        }
    }
}
