//! HTTP cache validation module
//!
//! Provides `ETag` generation, HTTP-date handling and conditional request evaluation.

use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Generate `ETag` from file content
///
/// # Returns
/// Quoted `ETag` string, e.g., `"abc123def"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Supports a single `ETag`, a comma separated list and the `*` wildcard.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

/// Format a timestamp for `Last-Modified`
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(HTTP_DATE_FORMAT).to_string()
}

/// Parse an HTTP date header value, `None` when malformed
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Whether the client's cached copy is still fresh
///
/// `If-None-Match` takes precedence; `If-Modified-Since` is only consulted
/// when it is absent. Modification times compare at second precision since
/// that is all the header carries.
pub fn is_not_modified(
    if_none_match: Option<&str>,
    if_modified_since: Option<&str>,
    etag: &str,
    modified: Option<SystemTime>,
) -> bool {
    if if_none_match.is_some() {
        return check_etag_match(if_none_match, etag);
    }

    let (Some(since), Some(modified)) = (if_modified_since.and_then(parse_http_date), modified)
    else {
        return false;
    };

    DateTime::<Utc>::from(modified).timestamp() <= since.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn epoch_plus(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_etag_consistency() {
        let etag = generate_etag(b"same content");
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert_eq!(etag, generate_etag(b"same content"));
        assert_ne!(etag, generate_etag(b"other content"));
    }

    #[test]
    fn test_check_etag_match() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(Some("\"different\""), etag));
        assert!(!check_etag_match(None, etag));
    }

    #[test]
    fn test_http_date_format() {
        assert_eq!(
            format_http_date(epoch_plus(784_111_777)),
            "Sun, 06 Nov 1994 08:49:37 GMT"
        );
        let parsed = parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT").unwrap();
        assert_eq!(parsed.timestamp(), 784_111_777);
        assert!(parse_http_date("yesterday").is_none());
    }

    #[test]
    fn test_if_modified_since() {
        let header = "Sun, 06 Nov 1994 08:49:37 GMT";
        let etag = "\"e\"";
        assert!(is_not_modified(None, Some(header), etag, Some(epoch_plus(784_111_777))));
        assert!(is_not_modified(None, Some(header), etag, Some(epoch_plus(784_111_700))));
        assert!(!is_not_modified(None, Some(header), etag, Some(epoch_plus(784_111_778))));
        assert!(!is_not_modified(None, Some("garbage"), etag, Some(epoch_plus(1))));
        assert!(!is_not_modified(None, Some(header), etag, None));
    }

    #[test]
    fn test_if_none_match_takes_precedence() {
        let header = "Sun, 06 Nov 1994 08:49:37 GMT";
        let old = Some(epoch_plus(1));
        assert!(!is_not_modified(Some("\"other\""), Some(header), "\"e\"", old));
        assert!(is_not_modified(Some("\"e\""), None, "\"e\"", None));
    }
}
