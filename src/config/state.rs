// Application state module
// Immutable context shared by every connection

use std::path::PathBuf;
use std::sync::Arc;

use super::types::Config;
use crate::http::mime::{ContentTypeResolver, MimeGuessResolver, OverrideResolver};

/// Application state
pub struct AppState {
    pub config: Config,
    /// Canonical form of `config.server.root`
    pub root: PathBuf,
    pub resolver: Arc<dyn ContentTypeResolver>,
}

impl AppState {
    /// Create `AppState` with the `.js`/`.wasm` overrides on top of `mime_guess`
    ///
    /// Fails when the root directory does not exist or cannot be resolved.
    pub fn new(config: Config) -> std::io::Result<Self> {
        Self::with_resolver(config, Arc::new(OverrideResolver::new(MimeGuessResolver)))
    }

    pub fn with_resolver(
        config: Config,
        resolver: Arc<dyn ContentTypeResolver>,
    ) -> std::io::Result<Self> {
        let root = PathBuf::from(&config.server.root).canonicalize()?;
        Ok(Self {
            config,
            root,
            resolver,
        })
    }
}
