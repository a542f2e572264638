//! URL handling for sidebar links.
//!
//! Links in the table of contents are stored relative to the site root.
//! A page deeper in the site reaches them through a root prefix such as
//! `../`, and the current page is matched by comparing fully resolved URLs.

use once_cell::sync::Lazy;
use regex::Regex;
use ::url::Url;

static ABSOLUTE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[a-z+]+:)?//").expect("absolute url pattern"));

/// `scheme://...` and protocol-relative `//...` links are never prefixed.
pub fn is_absolute(href: &str) -> bool {
    ABSOLUTE_URL.is_match(href)
}

/// Drops the `#fragment`, then the `?query`.
pub fn strip_suffixes(url: &str) -> &str {
    let url = url.split('#').next().unwrap_or_default();
    url.split('?').next().unwrap_or_default()
}

/// The URL a sidebar link must resolve to for it to count as the current page.
///
/// A directory URL (`.../book/`) stands for its `index.html`.
pub fn normalize_page_url(current_url: &str) -> String {
    let page = strip_suffixes(current_url.trim());
    let mut page = match Url::parse(page) {
        Ok(url) => String::from(url),
        Err(_) => page.to_string(),
    };
    if page.ends_with('/') {
        page.push_str("index.html");
    }
    page
}

/// The attribute value a link gets once rendered on a page `root_prefix` deep.
pub fn prefixed_href(href: &str, root_prefix: &str) -> String {
    if href.starts_with('#') || is_absolute(href) {
        href.to_string()
    } else {
        format!("{}{}", root_prefix, href)
    }
}

/// Resolves `href` against the document URL the way the browser does for
/// anchor elements. `None` when the document URL is not absolute.
pub fn resolve(document_url: &str, href: &str) -> Option<String> {
    let base = Url::parse(document_url.trim()).ok()?;
    base.join(href).ok().map(String::from)
}

/// Root prefix of a page addressed by a root-relative href.
pub fn path_to_root(href: &str) -> String {
    let path = strip_suffixes(href);
    let depth = path.trim_start_matches("./").matches('/').count();
    "../".repeat(depth)
}
