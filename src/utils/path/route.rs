//! Href processing utilities.
//!
//! - Link type detection (external vs local)
//! - Fragment splitting
//! - Web-style rewriting of filenames and hrefs

/// Check if a link is external (has a URL scheme like http:, data:, etc.)
/// or is protocol-relative (`//cdn.example.com/...`).
///
/// A valid scheme must:
/// - Have at least 2 characters before the colon (so `C:\fonts` stays local)
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
///
/// # Examples
/// ```ignore
/// assert!(is_external_link("https://example.com/font.woff2"));
/// assert!(is_external_link("data:image/png;base64,AAAA"));
/// assert!(is_external_link("//cdn.example.com/a.css"));
/// assert!(!is_external_link("../fonts/a.woff2"));
/// ```
#[inline]
pub fn is_external_link(link: &str) -> bool {
    if link.starts_with("//") {
        return true;
    }
    link.find(':').is_some_and(|pos| {
        pos > 1
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Split a reference into path and fragment/query suffix.
///
/// The suffix keeps its leading `#` or `?`.
///
/// # Examples
/// ```ignore
/// assert_eq!(split_path_fragment("font.svg#icon"), ("font.svg", "#icon"));
/// assert_eq!(split_path_fragment("a.woff2?v=3"), ("a.woff2", "?v=3"));
/// assert_eq!(split_path_fragment("a.woff2"), ("a.woff2", ""));
/// ```
#[inline]
pub fn split_path_fragment(url: &str) -> (&str, &str) {
    match url.find(['#', '?']) {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    }
}

/// Rewrite a filename or href to web style.
///
/// Backslashes become `/`, whitespace runs become a single `-`, repeated
/// dashes collapse and everything is lowercased.
pub fn to_web_style(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        let c = match c {
            '\\' => '/',
            c if c.is_whitespace() => '-',
            c => c,
        };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.extend(c.to_lowercase());
    }
    out
}
