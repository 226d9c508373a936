// Configuration module entry point
// Loads server configuration and builds the shared per-process state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, ServerConfig};

impl Config {
    /// Load the built-in configuration.
    ///
    /// Nothing is read from files or the environment: the server listens on
    /// `0.0.0.0:8000` and serves the working directory.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError>
    {
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.root", ".")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .set_default("http.server_name", concat!("wasmserve/", env!("CARGO_PKG_VERSION")))?
            .set_default("http.index_files", vec!["index.html", "index.htm"])?
            .set_default("http.keep_alive", true)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_serve_cwd_on_8000() {
        let cfg = Config::load().unwrap();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.root, ".");
        assert!(cfg.server.workers.is_none());
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "common");
        assert_eq!(cfg.http.index_files, vec!["index.html", "index.htm"]);
        assert!(cfg.http.keep_alive);
    }

    #[test]
    fn test_environment_not_consulted() {
        std::env::set_var("WASMSERVE_SERVER__PORT", "9999");
        std::env::set_var("WASMSERVE_SERVER__ROOT", "/tmp");
        let cfg = Config::load().unwrap();
        std::env::remove_var("WASMSERVE_SERVER__PORT");
        std::env::remove_var("WASMSERVE_SERVER__ROOT");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.root, ".");
    }

    #[test]
    fn test_socket_addr_all_interfaces() {
        let cfg = Config::load().unwrap();
        let addr = cfg.socket_addr().unwrap();
        assert!(addr.ip().is_unspecified());
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn test_invalid_host_rejected() {
        let mut cfg = Config::load().unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.socket_addr().is_err());
    }
}
