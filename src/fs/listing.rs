//! Auto-generated HTML directory listings.
//!
//! Entries are sorted by name, directory names carry a trailing `/`, hrefs
//! are percent-encoded, and display names are HTML-escaped.

use std::path::Path;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::ServeError;

/// Characters percent-encoded in listing hrefs. `/` stays literal so that
/// directory links keep their trailing slash.
const HREF_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'#')
    .add(b'%');

/// Render the listing page for `dir`, addressed by `request_path`.
///
/// # Errors
///
/// Returns a [`ServeError`] if the directory cannot be read.
pub async fn render(dir: &Path, request_path: &str) -> Result<String, ServeError> {
    let mut entries = Vec::new();
    let mut rd = tokio::fs::read_dir(dir).await.map_err(ServeError::from)?;
    while let Some(entry) = rd.next_entry().await.map_err(ServeError::from)? {
        // A name that is not valid UTF-8 cannot round-trip through an href;
        // skip it rather than emit a link that 404s when followed.
        let mut name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(_) => continue,
        };
        let is_dir = entry
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);
        if is_dir {
            name.push('/');
        }
        entries.push(name);
    }
    entries.sort();

    let title = escape_html(&format!("Directory listing for {request_path}"));
    let mut html = String::with_capacity(256 + entries.len() * 64);
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for name in &entries {
        let href = utf8_percent_encode(name, HREF_ENCODE);
        let display = escape_html(name);
        html.push_str(&format!("<li><a href=\"{href}\">{display}</a></li>\n"));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}

/// Minimal HTML escaping for text nodes and attribute values.
pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
