//! Directory listing page
//!
//! Generated when a directory has no index file. Entries are sorted
//! case-insensitively; directories get a trailing `/`, symlinks an `@`.

use std::fmt::Write as _;
use std::path::Path;
use tokio::fs;

/// One row of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    fn href(&self) -> String {
        let mut href = urlencoding::encode(&self.name).into_owned();
        if self.is_dir {
            href.push('/');
        }
        href
    }

    fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{}@", self.name)
        } else if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Read `dir` and return its entries in display order
pub async fn read_entries(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let is_symlink = entry
            .file_type()
            .await
            .is_ok_and(|t| t.is_symlink());
        // follows symlinks, so a link to a directory lists as one
        let is_dir = fs::metadata(entry.path())
            .await
            .is_ok_and(|m| m.is_dir());
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink,
        });
    }

    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    Ok(entries)
}

/// Render the HTML page for `url_path`, the decoded request path
pub fn render(url_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(url_path));

    let mut html = String::with_capacity(256 + entries.len() * 64);
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>\n</head>\n<body>");
    let _ = writeln!(html, "<h1>{title}</h1>\n<hr>\n<ul>");
    for entry in entries {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            escape_html(&entry.href()),
            escape_html(&entry.display_name()),
        );
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}
