//! HTTP response building module
//!
//! Provides builders for the responses a static file server emits, decoupled
//! from filesystem access.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{
    ACCEPT_RANGES, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, ETAG,
    LAST_MODIFIED, LOCATION,
};
use hyper::{Response, StatusCode};

/// Validators and metadata sent with every file response
#[derive(Debug, Clone)]
pub struct FileMeta<'a> {
    pub content_type: &'a str,
    pub etag: &'a str,
    pub last_modified: Option<&'a str>,
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str, last_modified: Option<&str>) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(ETAG, etag)
        .header(CACHE_CONTROL, "no-cache");
    if let Some(date) = last_modified {
        builder = builder.header(LAST_MODIFIED, date);
    }
    finish(builder, Bytes::new(), "304")
}

/// Build 301 redirect, used to add the trailing slash to directory URLs
pub fn build_301_response(location: &str) -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(LOCATION, location)
        .header(CONTENT_LENGTH, 0);
    finish(builder, Bytes::new(), "301")
}

/// Build a plain-text error response
pub fn build_error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let body = format!("{} {message}\n", status.as_u16());
    let builder = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(CONTENT_LENGTH, body.len());
    finish(builder, Bytes::from(body), status.as_str())
}

pub fn build_403_response() -> Response<Full<Bytes>> {
    build_error_response(StatusCode::FORBIDDEN, "Forbidden")
}

pub fn build_404_response() -> Response<Full<Bytes>> {
    build_error_response(StatusCode::NOT_FOUND, "File not found")
}

pub fn build_500_response() -> Response<Full<Bytes>> {
    build_error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

pub fn build_501_response() -> Response<Full<Bytes>> {
    build_error_response(StatusCode::NOT_IMPLEMENTED, "Unsupported method")
}

/// Build 416 Range Not Satisfiable response
pub fn build_416_response(file_size: usize) -> Response<Full<Bytes>> {
    let body = "416 Range Not Satisfiable\n";
    let builder = Response::builder()
        .status(StatusCode::RANGE_NOT_SATISFIABLE)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(CONTENT_LENGTH, body.len())
        .header(CONTENT_RANGE, format!("bytes */{file_size}"));
    finish(builder, Bytes::from_static(body.as_bytes()), "416")
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    let builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .header(CONTENT_LENGTH, content_length);
    finish(builder, body, "HTML")
}

/// Build 200 response for a whole file
pub fn build_file_response(data: Bytes, meta: &FileMeta<'_>, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    let builder = file_headers(Response::builder().status(StatusCode::OK), meta)
        .header(CONTENT_LENGTH, content_length);
    finish(builder, body, "200")
}

/// Build 206 Partial Content response
pub fn build_partial_response(
    data: Bytes,
    meta: &FileMeta<'_>,
    content_range: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    let builder = file_headers(Response::builder().status(StatusCode::PARTIAL_CONTENT), meta)
        .header(CONTENT_LENGTH, content_length)
        .header(CONTENT_RANGE, content_range);
    finish(builder, body, "206")
}

fn file_headers(
    builder: hyper::http::response::Builder,
    meta: &FileMeta<'_>,
) -> hyper::http::response::Builder {
    let builder = builder
        .header(CONTENT_TYPE, meta.content_type)
        .header(ACCEPT_RANGES, "bytes")
        .header(ETAG, meta.etag)
        .header(CACHE_CONTROL, "no-cache");
    match meta.last_modified {
        Some(date) => builder.header(LAST_MODIFIED, date),
        None => builder,
    }
}

/// Attach the body, logging and degrading to an empty response on builder errors
fn finish(
    builder: hyper::http::response::Builder,
    body: Bytes,
    status: &str,
) -> Response<Full<Bytes>> {
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error(status, &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(resp: &'a Response<Full<Bytes>>, name: &str) -> Option<&'a str> {
        resp.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_404_has_own_content_type() {
        let resp = build_404_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(header(&resp, "content-type"), Some("text/plain; charset=utf-8"));
    }

    #[test]
    fn test_file_response_headers() {
        let meta = FileMeta {
            content_type: "application/wasm",
            etag: "\"abc\"",
            last_modified: Some("Sun, 06 Nov 1994 08:49:37 GMT"),
        };
        let resp = build_file_response(Bytes::from_static(b"\0asm"), &meta, false);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(header(&resp, "content-type"), Some("application/wasm"));
        assert_eq!(header(&resp, "content-length"), Some("4"));
        assert_eq!(header(&resp, "etag"), Some("\"abc\""));
        assert_eq!(header(&resp, "last-modified"), Some("Sun, 06 Nov 1994 08:49:37 GMT"));
        assert_eq!(header(&resp, "accept-ranges"), Some("bytes"));
    }

    #[test]
    fn test_head_keeps_length() {
        let meta = FileMeta {
            content_type: "text/css",
            etag: "\"x\"",
            last_modified: None,
        };
        let resp = build_file_response(Bytes::from_static(b"body{}"), &meta, true);
        assert_eq!(header(&resp, "content-length"), Some("6"));
        assert!(header(&resp, "last-modified").is_none());
    }

    #[test]
    fn test_redirect_location() {
        let resp = build_301_response("/pkg/");
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(header(&resp, "location"), Some("/pkg/"));
    }
}
