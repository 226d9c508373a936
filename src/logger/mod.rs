//! Logger module
//!
//! Startup line, per-request access log and error/warning log.
//! Targets are stderr by default and may be redirected to files.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => eprintln!("{message}"),
    }
}

/// The one line printed to stdout once the port is bound
pub fn startup_message(addr: &SocketAddr) -> String {
    format!("Serving at port {}", addr.port())
}

pub fn log_server_start(addr: &SocketAddr) {
    println!("{}", startup_message(addr));
}

pub fn log_shutdown(reason: &str) {
    write_error(&format!("[SHUTDOWN] {reason}, closing listener"));
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_error(&format!("[ERROR] Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_message() {
        let addr: SocketAddr = "0.0.0.0:8000".parse().unwrap();
        assert_eq!(startup_message(&addr), "Serving at port 8000");
    }
}
