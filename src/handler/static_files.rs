//! Static file serving module
//!
//! Maps request paths onto the root directory, confines them to it, and
//! builds file, directory-index and listing responses.

use crate::config::AppState;
use crate::handler::error::ServeError;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, range::RangeParseResult, response::FileMeta};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Map a decoded URL path to a location under `root`
///
/// Empty and `.` segments are dropped; `..` removes the previous segment but
/// never climbs above `root`, so `/../secret.txt` becomes `root/secret.txt`.
/// Returns `None` for a segment containing a backslash, which names no file.
pub fn translate_path(root: &Path, url_path: &str) -> Option<PathBuf> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in url_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if s.contains('\\') => return None,
            s => segments.push(s),
        }
    }

    let mut path = root.to_path_buf();
    path.extend(segments);
    Some(path)
}

/// `Location` for the trailing-slash redirect of a directory
///
/// Leading slashes collapse to one so `//host` never becomes a
/// scheme-relative URL pointing at another site.
pub fn directory_location(raw_path: &str, query: Option<&str>) -> String {
    let path = raw_path.trim_start_matches('/');
    match query {
        Some(query) => format!("/{path}/?{query}"),
        None => format!("/{path}/"),
    }
}

/// Resolve symlinks and require the result to stay inside `root`
async fn confine(root: &Path, path: &Path) -> Result<PathBuf, ServeError> {
    let canonical = fs::canonicalize(path)
        .await
        .map_err(|e| ServeError::from_io(path, e))?;
    if canonical.starts_with(root) {
        Ok(canonical)
    } else {
        crate::logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path.display(),
            canonical.display()
        ));
        Err(ServeError::Forbidden(path.to_path_buf()))
    }
}

/// Serve whatever the request path names under the root
pub async fn serve(
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, ServeError> {
    let Some(requested) = translate_path(&state.root, &ctx.path) else {
        return Err(ServeError::NotFound(PathBuf::from(ctx.path.to_string())));
    };
    let metadata = fs::metadata(&requested)
        .await
        .map_err(|e| ServeError::from_io(&requested, e))?;
    let resolved = confine(&state.root, &requested).await?;

    if metadata.is_dir() {
        return serve_directory(ctx, state, &requested, &resolved).await;
    }

    // "/app.js/" names a directory that does not exist
    if ctx.path.ends_with('/') {
        return Err(ServeError::NotFound(requested));
    }

    serve_file(ctx, state, &requested, &resolved, &metadata).await
}

async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    requested: &Path,
    resolved: &Path,
) -> Result<Response<Full<Bytes>>, ServeError> {
    if !ctx.path.ends_with('/') {
        let location = directory_location(ctx.raw_path, ctx.query);
        return Ok(http::build_301_response(&location));
    }

    for index_file in &state.config.http.index_files {
        let index_path = requested.join(index_file);
        match fs::metadata(&index_path).await {
            Ok(metadata) if metadata.is_file() => {
                let index_resolved = confine(&state.root, &index_path).await?;
                return serve_file(ctx, state, &index_path, &index_resolved, &metadata).await;
            }
            _ => {}
        }
    }

    let entries = listing::read_entries(resolved).await.map_err(|e| {
        crate::logger::log_warning(&format!(
            "No permission to list directory '{}': {e}",
            resolved.display()
        ));
        ServeError::NotFound(resolved.to_path_buf())
    })?;
    Ok(http::build_html_response(
        listing::render(&ctx.path, &entries),
        ctx.is_head,
    ))
}

/// Serve a regular file with validators, conditional and range handling
///
/// The content type follows the name the client asked for (`requested`);
/// the bytes come from `resolved`, its symlink-free form inside the root.
async fn serve_file(
    ctx: &RequestContext<'_>,
    state: &AppState,
    requested: &Path,
    resolved: &Path,
    metadata: &Metadata,
) -> Result<Response<Full<Bytes>>, ServeError> {
    let data = fs::read(resolved)
        .await
        .map_err(|e| ServeError::from_io(resolved, e))?;

    let content_type = state.resolver.resolve(&requested.to_string_lossy());
    let etag = cache::generate_etag(&data);
    let modified = metadata.modified().ok();
    let last_modified = modified.map(cache::format_http_date);

    if cache::is_not_modified(
        ctx.if_none_match.as_deref(),
        ctx.if_modified_since.as_deref(),
        &etag,
        modified,
    ) {
        return Ok(http::build_304_response(&etag, last_modified.as_deref()));
    }

    let meta = FileMeta {
        content_type,
        etag: &etag,
        last_modified: last_modified.as_deref(),
    };
    let total_size = data.len();

    match http::parse_range_header(ctx.range_header.as_deref(), total_size) {
        RangeParseResult::Valid(range) => {
            let body = Bytes::from(data).slice(range.start..=range.end);
            Ok(http::response::build_partial_response(
                body,
                &meta,
                &range.content_range(total_size),
                ctx.is_head,
            ))
        }
        RangeParseResult::NotSatisfiable => Ok(http::build_416_response(total_size)),
        RangeParseResult::None => Ok(http::response::build_file_response(
            Bytes::from(data),
            &meta,
            ctx.is_head,
        )),
    }
}
