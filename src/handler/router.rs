//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, path decoding,
//! dispatch to the static file handler, error mapping and access logging.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, IF_MODIFIED_SINCE, IF_NONE_MATCH, RANGE, REFERER, SERVER, USER_AGENT};
use hyper::{HeaderMap, Method, Request, Response, Version};
use std::borrow::Cow;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Percent-decoded path, query stripped
    pub path: Cow<'a, str>,
    /// Path exactly as received
    pub raw_path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub range_header: Option<String>,
}

impl<'a> RequestContext<'a> {
    pub fn from_request<B>(req: &'a Request<B>) -> Self {
        let uri = req.uri();
        let headers = req.headers();
        Self {
            path: decode_path(uri.path()),
            raw_path: uri.path(),
            query: uri.query(),
            is_head: req.method() == Method::HEAD,
            if_none_match: header_string(headers, IF_NONE_MATCH),
            if_modified_since: header_string(headers, IF_MODIFIED_SINCE),
            range_header: header_string(headers, RANGE),
        }
    }
}

fn header_string(headers: &HeaderMap, name: hyper::header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Percent-decode a URL path; invalid UTF-8 is replaced rather than rejected
pub fn decode_path(raw: &str) -> Cow<'_, str> {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded,
        Err(_) => Cow::Owned(String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()),
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let mut response = match *req.method() {
        Method::GET | Method::HEAD => {
            let ctx = RequestContext::from_request(&req);
            match static_files::serve(&ctx, &state).await {
                Ok(resp) => resp,
                Err(err) => {
                    match err.status().as_u16() {
                        404 => {}
                        500 => logger::log_error(&err.to_string()),
                        _ => logger::log_warning(&err.to_string()),
                    }
                    err.into_response()
                }
            }
        }
        _ => http::build_501_response(),
    };

    if let Ok(value) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, value);
    }

    if state.config.logging.access_log {
        let entry = access_entry(&req, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn access_entry<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let uri = req.uri();
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path(), hyper::http::uri::PathAndQuery::as_str);

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        target.to_string(),
    );
    entry.http_version = match req.version() {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .filter(|&n| n > 0);
    entry.referer = header_string(req.headers(), REFERER);
    entry.user_agent = header_string(req.headers(), USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}
