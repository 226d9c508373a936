//! Per-request failure classification
//!
//! Every variant maps to exactly one status code; none of them is fatal to
//! the server.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::http;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("no such file: {}", .0.display())]
    NotFound(PathBuf),

    #[error("access denied: {}", .0.display())]
    Forbidden(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ServeError {
    /// Classify a filesystem error raised while accessing `path`
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound
            | io::ErrorKind::NotADirectory
            | io::ErrorKind::InvalidInput => Self::NotFound(path),
            io::ErrorKind::PermissionDenied => Self::Forbidden(path),
            _ => Self::Io { path, source },
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self) -> Response<Full<Bytes>> {
        match self {
            Self::NotFound(_) => http::build_404_response(),
            Self::Forbidden(_) => http::build_403_response(),
            Self::Io { .. } => http::build_500_response(),
        }
    }
}
