//! HTTP Range request parsing module
//!
//! Single `bytes=` range parsing (RFC 9110 §14). Multi-range requests are
//! answered with the full body.

/// Inclusive byte range resolved against a file size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// `Content-Range` header value
    pub fn content_range(self, total_size: usize) -> String {
        format!("bytes {}-{}/{total_size}", self.start, self.end)
    }
}

/// Range header parse result
#[derive(Debug, PartialEq, Eq)]
pub enum RangeParseResult {
    Valid(ByteRange),
    /// Should be answered with 416
    NotSatisfiable,
    /// No Range header, other unit or malformed: serve full content
    None,
}

/// Parse HTTP Range header
///
/// Supported forms: `bytes=start-end`, `bytes=start-` and `bytes=-suffix`.
///
/// # Examples
/// ```
/// use wasmserve::http::range::{parse_range_header, ByteRange, RangeParseResult};
///
/// assert_eq!(
///     parse_range_header(Some("bytes=0-99"), 1000),
///     RangeParseResult::Valid(ByteRange { start: 0, end: 99 })
/// );
/// assert_eq!(parse_range_header(None, 1000), RangeParseResult::None);
/// ```
pub fn parse_range_header(range_header: Option<&str>, file_size: usize) -> RangeParseResult {
    let Some(ranges) = range_header.and_then(|h| h.trim().strip_prefix("bytes=")) else {
        return RangeParseResult::None;
    };

    if ranges.contains(',') {
        return RangeParseResult::None;
    }

    let Some((first, last)) = ranges.split_once('-') else {
        return RangeParseResult::None;
    };
    let (first, last) = (first.trim(), last.trim());

    if first.is_empty() {
        return suffix_range(last, file_size);
    }

    let Ok(start) = first.parse::<usize>() else {
        return RangeParseResult::None;
    };
    let end = if last.is_empty() {
        None
    } else {
        match last.parse::<usize>() {
            Ok(end) => Some(end),
            Err(_) => return RangeParseResult::None,
        }
    };

    if end.is_some_and(|end| end < start) {
        return RangeParseResult::None;
    }
    if start >= file_size {
        return RangeParseResult::NotSatisfiable;
    }

    let last_byte = file_size - 1;
    RangeParseResult::Valid(ByteRange {
        start,
        end: end.map_or(last_byte, |end| end.min(last_byte)),
    })
}

/// `-N`: the last N bytes
fn suffix_range(suffix: &str, file_size: usize) -> RangeParseResult {
    let Ok(len) = suffix.parse::<usize>() else {
        return RangeParseResult::None;
    };
    if len == 0 || file_size == 0 {
        return RangeParseResult::NotSatisfiable;
    }

    RangeParseResult::Valid(ByteRange {
        start: file_size.saturating_sub(len),
        end: file_size - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(start: usize, end: usize) -> RangeParseResult {
        RangeParseResult::Valid(ByteRange { start, end })
    }

    #[test]
    fn test_no_range() {
        assert_eq!(parse_range_header(None, 100), RangeParseResult::None);
        assert_eq!(parse_range_header(Some("items=0-1"), 100), RangeParseResult::None);
    }

    #[test]
    fn test_closed_and_open_ranges() {
        assert_eq!(parse_range_header(Some("bytes=0-9"), 100), valid(0, 9));
        assert_eq!(parse_range_header(Some("bytes=50-"), 100), valid(50, 99));
        assert_eq!(parse_range_header(Some("bytes=90-500"), 100), valid(90, 99));
    }

    #[test]
    fn test_suffix_range() {
        assert_eq!(parse_range_header(Some("bytes=-20"), 100), valid(80, 99));
        assert_eq!(parse_range_header(Some("bytes=-500"), 100), valid(0, 99));
        assert_eq!(
            parse_range_header(Some("bytes=-0"), 100),
            RangeParseResult::NotSatisfiable
        );
    }

    #[test]
    fn test_not_satisfiable() {
        assert_eq!(
            parse_range_header(Some("bytes=200-"), 100),
            RangeParseResult::NotSatisfiable
        );
        assert_eq!(
            parse_range_header(Some("bytes=0-"), 0),
            RangeParseResult::NotSatisfiable
        );
    }

    #[test]
    fn test_malformed_is_ignored() {
        for header in ["bytes=a-b", "bytes=0-9,20-29", "bytes=9-0", "bytes=5"] {
            assert_eq!(parse_range_header(Some(header), 100), RangeParseResult::None, "{header}");
        }
    }

    #[test]
    fn test_content_range() {
        assert_eq!(ByteRange { start: 0, end: 3 }.content_range(10), "bytes 0-3/10");
    }
}
