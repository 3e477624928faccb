use crate::{UrlError, UrlResult};
use std::fmt;
use url::{ParseError, Url};

/// Deduplication identity of a page: `host[:port]` followed by the path
///
/// Keys never carry a scheme, query, fragment, or trailing slash, so raw URLs
/// that differ only in those parts share one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CrawlKey(String);

impl CrawlKey {
    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning the underlying string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CrawlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CrawlKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes a URL into its [`CrawlKey`]
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or hostless
/// 2. Drop the scheme, query, and fragment
/// 3. Keep the host (lowercased by the parser) and any non-default port
/// 4. Strip exactly one trailing slash from the path, so the root path
///    becomes empty
///
/// Input without a scheme is read as `host/path`, which makes the function
/// idempotent: normalizing a key yields the same key.
///
/// # Arguments
///
/// * `raw_url` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(CrawlKey)` - Normalized key
/// * `Err(UrlError)` - The URL could not be parsed into host and path
///
/// # Examples
///
/// ```
/// use link_census::url::normalize_url;
///
/// let key = normalize_url("https://Example.com/blog/?page=2#top").unwrap();
/// assert_eq!(key.as_str(), "example.com/blog");
/// assert_eq!(normalize_url(key.as_str()).unwrap(), key);
/// ```
pub fn normalize_url(raw_url: &str) -> UrlResult<CrawlKey> {
    let raw_url = raw_url.trim();
    if raw_url.is_empty() {
        return Err(UrlError::Empty);
    }

    let url = parse_key_input(raw_url)?;

    let host = match url.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => return Err(UrlError::MissingHost),
    };

    let mut key = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    let path = url.path();
    key.push_str(path.strip_suffix('/').unwrap_or(path));

    Ok(CrawlKey(key))
}

/// Parses either a full URL or a scheme-less `host[:port]/path` key
fn parse_key_input(raw_url: &str) -> UrlResult<Url> {
    match Url::parse(raw_url) {
        Ok(url) if url.has_host() => Ok(url),
        // `localhost:8080/docs` parses as scheme `localhost` with an opaque path
        Ok(url) if url.path().starts_with(|c: char| c.is_ascii_digit()) => {
            parse_with_default_scheme(raw_url)
        }
        Ok(_) => Err(UrlError::MissingHost),
        Err(ParseError::RelativeUrlWithoutBase) if !raw_url.starts_with('/') => {
            parse_with_default_scheme(raw_url)
        }
        Err(e) => Err(UrlError::Parse(e.to_string())),
    }
}

fn parse_with_default_scheme(raw_url: &str) -> UrlResult<Url> {
    Url::parse(&format!("http://{}", raw_url)).map_err(|e| UrlError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> String {
        normalize_url(raw).unwrap().into_string()
    }

    #[test]
    fn test_remove_scheme() {
        assert_eq!(key("http://example.com"), "example.com");
        assert_eq!(key("https://example.com"), "example.com");
    }

    #[test]
    fn test_keep_path() {
        assert_eq!(key("http://example.com/path"), "example.com/path");
    }

    #[test]
    fn test_remove_trailing_slash() {
        assert_eq!(key("http://example.com/path/"), "example.com/path");
    }

    #[test]
    fn test_root_path_becomes_empty() {
        assert_eq!(key("https://example.com/"), "example.com");
    }

    #[test]
    fn test_only_one_trailing_slash_removed() {
        assert_eq!(key("http://example.com/path//"), "example.com/path/");
    }

    #[test]
    fn test_remove_query() {
        assert_eq!(key("http://example.com/path?query=string"), "example.com/path");
    }

    #[test]
    fn test_remove_fragment() {
        assert_eq!(key("http://example.com/path/#/fragment"), "example.com/path");
    }

    #[test]
    fn test_equivalent_urls_share_a_key() {
        let expected = "ex.com/a";
        assert_eq!(key("http://ex.com/a/"), expected);
        assert_eq!(key("http://ex.com/a"), expected);
        assert_eq!(key("https://ex.com/a?x=1#y"), expected);
    }

    #[test]
    fn test_lowercase_host() {
        assert_eq!(key("https://EXAMPLE.COM/Page"), "example.com/Page");
    }

    #[test]
    fn test_keep_explicit_port() {
        assert_eq!(key("http://127.0.0.1:8080/docs/"), "127.0.0.1:8080/docs");
        assert_eq!(key("http://localhost:3000"), "localhost:3000");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "https://blog.boot.dev/path/one/",
            "http://example.com",
            "https://ex.com/a?x=1#y",
            "http://127.0.0.1:8080/docs/",
            "http://localhost:3000/a/b",
        ];

        for input in inputs {
            let once = normalize_url(input).unwrap();
            let twice = normalize_url(once.as_str()).unwrap();
            assert_eq!(once, twice, "normalization of {} is not idempotent", input);
        }
    }

    #[test]
    fn test_empty_url() {
        assert_eq!(normalize_url(""), Err(UrlError::Empty));
        assert_eq!(normalize_url("   "), Err(UrlError::Empty));
    }

    #[test]
    fn test_malformed_url() {
        assert!(matches!(normalize_url("not a url"), Err(UrlError::Parse(_))));
        assert!(matches!(normalize_url("/relative/path"), Err(UrlError::Parse(_))));
        assert!(matches!(normalize_url("http://"), Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_hostless_url() {
        assert_eq!(
            normalize_url("mailto:someone@example.com"),
            Err(UrlError::MissingHost)
        );
    }

    #[test]
    fn test_display() {
        let key = normalize_url("https://example.com/about/").unwrap();
        assert_eq!(key.to_string(), "example.com/about");
    }
}
