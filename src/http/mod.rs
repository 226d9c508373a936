//! HTTP protocol layer module
//!
//! Content-type resolution, cache validation, range parsing and response
//! builders, independent of how files are located on disk.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

pub use mime::{ContentTypeResolver, MimeGuessResolver, OverrideResolver};
pub use range::{parse_range_header, RangeParseResult};
pub use response::{
    build_301_response, build_304_response, build_403_response, build_404_response,
    build_416_response, build_500_response, build_501_response, build_html_response,
};
