use std::sync::Arc;

use wasmserve::config::{AppState, Config};
use wasmserve::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    let state = AppState::new(cfg).map_err(|e| {
        logger::log_error(&format!("Cannot serve root directory: {e}"));
        e
    })?;

    runtime.block_on(server::run(Arc::new(state)))
}
