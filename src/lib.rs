//! Static file server for WebAssembly front-ends.
//!
//! Serves a directory over HTTP/1.1 and forces `application/javascript` for
//! `.js` and `application/wasm` for `.wasm`, leaving every other content type
//! to `mime_guess`.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
