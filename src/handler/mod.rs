//! Request handler module
//!
//! Routes every GET/HEAD request to the static file handler and maps failures
//! to status codes.

pub mod error;
pub mod listing;
pub mod router;
pub mod static_files;

pub use error::ServeError;
pub use router::handle_request;
