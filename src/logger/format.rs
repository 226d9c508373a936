//! Access log format module
//!
//! Supported formats:
//! - `common` (Common Log Format - CLF), the default
//! - `combined` (CLF plus referer and user agent)
//! - `json` (one JSON object per line)
//!
//! Unknown format names fall back to `common`.

use chrono::{DateTime, Local};
use std::fmt::Write;

const CLF_TIME_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Access log entry for one request/response pair
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    pub time: DateTime<Local>,
    pub method: String,
    /// Request target as received, including any query string
    pub target: String,
    /// HTTP version (1.0, 1.1)
    pub http_version: String,
    pub status: u16,
    /// Response body size in bytes, `None` when nothing was sent
    pub body_bytes: Option<usize>,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: String, method: String, target: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            target,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: None,
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => format!(
                "{} \"{}\" \"{}\"",
                self.format_common(),
                self.referer.as_deref().unwrap_or("-"),
                self.user_agent.as_deref().unwrap_or("-"),
            ),
            "json" => self.format_json(),
            _ => self.format_common(),
        }
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        let bytes = self
            .body_bytes
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        format!(
            "{} - - [{}] \"{} {} HTTP/{}\" {} {}",
            self.remote_addr,
            self.time.format(CLF_TIME_FORMAT),
            self.method,
            self.target,
            self.http_version,
            self.status,
            bytes,
        )
    }

    fn format_json(&self) -> String {
        let opt = |v: Option<&str>| v.map_or_else(|| "null".to_string(), |s| format!("\"{}\"", escape_json(s)));

        format!(
            r#"{{"remote_addr":"{}","time":"{}","method":"{}","target":"{}","http_version":"{}","status":{},"body_bytes":{},"referer":{},"user_agent":{},"request_time_us":{}}}"#,
            escape_json(&self.remote_addr),
            self.time.to_rfc3339(),
            escape_json(&self.method),
            escape_json(&self.target),
            escape_json(&self.http_version),
            self.status,
            self.body_bytes.unwrap_or(0),
            opt(self.referer.as_deref()),
            opt(self.user_agent.as_deref()),
            self.request_time_us,
        )
    }
}

/// Escape special characters for JSON string
fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if u32::from(c) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "192.168.1.1".to_string(),
            "GET".to_string(),
            "/pkg/app.js?v=2".to_string(),
        );
        entry.status = 200;
        entry.body_bytes = Some(1234);
        entry.referer = Some("http://localhost:8000/".to_string());
        entry.user_agent = Some("Mozilla/5.0".to_string());
        entry.request_time_us = 1500;
        entry
    }

    #[test]
    fn test_format_common() {
        let log = create_test_entry().format("common");
        assert!(log.starts_with("192.168.1.1 - - ["));
        assert!(log.ends_with("\"GET /pkg/app.js?v=2 HTTP/1.1\" 200 1234"));
        assert!(!log.contains("Mozilla"));
    }

    #[test]
    fn test_format_combined() {
        let log = create_test_entry().format("combined");
        assert!(log.contains("200 1234 \"http://localhost:8000/\" \"Mozilla/5.0\""));
    }

    #[test]
    fn test_missing_size_is_dash() {
        let mut entry = create_test_entry();
        entry.status = 304;
        entry.body_bytes = None;
        assert!(entry.format("common").ends_with(" 304 -"));
    }

    #[test]
    fn test_format_json() {
        let log = create_test_entry().format("json");
        assert!(log.contains(r#""remote_addr":"192.168.1.1""#));
        assert!(log.contains(r#""target":"/pkg/app.js?v=2""#));
        assert!(log.contains(r#""status":200"#));
        assert!(log.contains(r#""body_bytes":1234"#));
    }

    #[test]
    fn test_json_escapes_control_characters() {
        assert_eq!(escape_json("a\"b\\c\n"), r#"a\"b\\c\n"#);
        assert_eq!(escape_json("\u{1b}[31m\u{0}"), r"\u001b[31m\u0000");

        let mut entry = create_test_entry();
        entry.user_agent = Some("bot\u{7}\u{1f}".to_string());
        assert!(entry.format("json").contains(r#""user_agent":"bot\u0007\u001f""#));
    }

    #[test]
    fn test_unknown_format_is_common() {
        let entry = create_test_entry();
        assert_eq!(entry.format("nginx"), entry.format("common"));
    }
}
