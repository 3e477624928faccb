//! HTML parser for extracting anchor targets
//!
//! Links are returned raw and in document order. Filtering them down to
//! crawlable internal pages is left to the scheduler.

use scraper::{Html, Selector};
use thiserror::Error;

/// Errors raised while extracting links from a document
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid selector: {0}")]
    Selector(String),
}

/// Extracts the href of every `<a>` element in the document
///
/// # Link Rules
///
/// Applied in order to the first `href` of each anchor:
/// 1. A root-relative href (`/path`) is prefixed with `base_url`
/// 2. An href starting with `#` or `?` becomes an empty string
/// 3. An anchor without an href contributes an empty string
///
/// Empty strings keep their slot so the output lines up with the anchors in
/// the document. Every other href is returned unchanged.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The crawl's base URL, used to absolutize root-relative links
///
/// # Returns
///
/// * `Ok(Vec<String>)` - One entry per anchor, in document order
/// * `Err(ExtractError)` - The anchor selector could not be built
///
/// # Example
///
/// ```
/// use link_census::crawler::extract_links;
///
/// let html = r##"<a href="/path/one">One</a><a href="#top">Top</a>"##;
/// let links = extract_links(html, "https://blog.boot.dev").unwrap();
/// assert_eq!(links, vec!["https://blog.boot.dev/path/one", ""]);
/// ```
pub fn extract_links(html: &str, base_url: &str) -> Result<Vec<String>, ExtractError> {
    let document = Html::parse_document(html);
    let anchor_selector =
        Selector::parse("a").map_err(|e| ExtractError::Selector(format!("{:?}", e)))?;

    let base = base_url.trim_end_matches('/');

    let links = document
        .select(&anchor_selector)
        .map(|element| match element.value().attr("href") {
            Some(href) => resolve_href(href, base),
            None => String::new(),
        })
        .collect();

    Ok(links)
}

/// Applies the root-relative and same-page rules to one href
fn resolve_href(href: &str, base: &str) -> String {
    let href = if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        href.to_string()
    };

    if href.starts_with('#') || href.starts_with('?') {
        return String::new();
    }

    href
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://blog.boot.dev";

    fn wrap(body: &str) -> String {
        format!("<html><body>{}</body></html>", body)
    }

    #[test]
    fn test_absolute_and_relative_urls() {
        let html = wrap(
            r#"<a href="/path/one"><span>Boot.dev</span></a>
               <a href="https://other.com/path/one"><span>Boot.dev</span></a>"#,
        );
        let links = extract_links(&html, BASE).unwrap();
        assert_eq!(
            links,
            vec!["https://blog.boot.dev/path/one", "https://other.com/path/one"]
        );
    }

    #[test]
    fn test_root_link() {
        let html = wrap(r#"<a href="/">Home</a><a href="https://other.com/x">Other</a>"#);
        let links = extract_links(&html, BASE).unwrap();
        assert_eq!(links, vec!["https://blog.boot.dev/", "https://other.com/x"]);
    }

    #[test]
    fn test_base_with_trailing_slash() {
        let html = wrap(r#"<a href="/about">About</a>"#);
        let links = extract_links(&html, "https://blog.boot.dev/").unwrap();
        assert_eq!(links, vec!["https://blog.boot.dev/about"]);
    }

    #[test]
    fn test_anchor_without_href() {
        let html = wrap(r#"<a href>Empty</a><a name="x">Named</a><a href="https://other.com/x">Other</a>"#);
        let links = extract_links(&html, BASE).unwrap();
        assert_eq!(links, vec!["", "", "https://other.com/x"]);
    }

    #[test]
    fn test_fragment_slot_preserved() {
        let html = wrap(r##"<a href="#id">Jump</a><a href="https://other.com/x">Other</a>"##);
        let links = extract_links(&html, BASE).unwrap();
        assert_eq!(links, vec!["", "https://other.com/x"]);
    }

    #[test]
    fn test_query_slot_preserved() {
        let html = wrap(r#"<a href="https://other.com/path/one">Other</a><a href="?query=string">Q</a>"#);
        let links = extract_links(&html, BASE).unwrap();
        assert_eq!(links, vec!["https://other.com/path/one", ""]);
    }

    #[test]
    fn test_other_hrefs_pass_through() {
        let html = wrap(
            r#"<a href="mailto:test@example.com">Mail</a>
               <a href="relative/page">Rel</a>
               <a href="javascript:void(0)">JS</a>"#,
        );
        let links = extract_links(&html, BASE).unwrap();
        assert_eq!(
            links,
            vec!["mailto:test@example.com", "relative/page", "javascript:void(0)"]
        );
    }

    #[test]
    fn test_first_href_wins() {
        let html = wrap(r#"<a href="/first" href="/second">Dup</a>"#);
        let links = extract_links(&html, BASE).unwrap();
        assert_eq!(links, vec!["https://blog.boot.dev/first"]);
    }

    #[test]
    fn test_nested_and_malformed_markup() {
        let html = r#"<div><p><a href="/one">One</a><div></span><a href="/two">Two</a></p><table><a href="/three">Three"#;
        let links = extract_links(html, BASE).unwrap();
        assert_eq!(
            links,
            vec![
                "https://blog.boot.dev/one",
                "https://blog.boot.dev/two",
                "https://blog.boot.dev/three",
            ]
        );
    }

    #[test]
    fn test_ignores_non_anchor_links() {
        let html = r#"<html><head><link rel="canonical" href="/canonical"></head>
            <body><img src="/img.png"><script src="/app.js"></script></body></html>"#;
        let links = extract_links(html, BASE).unwrap();
        assert!(links.is_empty());
    }
}
