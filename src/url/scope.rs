//! Crawl scope: which discovered URLs count as internal

use crate::{UrlError, UrlResult};
use url::Url;

/// The set of URLs a crawl is allowed to follow
///
/// A URL is in scope when its raw text starts with the seed URL exactly as
/// given, and its parsed scheme equals the seed's scheme.
#[derive(Debug, Clone)]
pub struct CrawlScope {
    base_url: String,
    scheme: String,
}

impl CrawlScope {
    /// Creates a scope rooted at the given seed URL
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlScope)` - The seed parsed and has a host
    /// * `Err(UrlError)` - The seed is malformed or hostless
    pub fn new(base_url: &str) -> UrlResult<Self> {
        let parsed = Url::parse(base_url).map_err(|e| UrlError::Parse(e.to_string()))?;

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(UrlError::MissingHost);
        }

        Ok(Self {
            base_url: base_url.to_string(),
            scheme: parsed.scheme().to_string(),
        })
    }

    /// The seed URL this scope was built from
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The scheme every admitted URL must share
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Checks a raw discovered URL against the scope
    ///
    /// The textual prefix check runs first, so empty strings and links to other
    /// hosts are rejected without being parsed.
    ///
    /// # Returns
    ///
    /// * `Ok(Url)` - The parsed URL, in scope
    /// * `Err(UrlError::OutOfScope)` - The raw text does not start with the seed
    /// * `Err(UrlError::Parse)` - The URL is malformed
    /// * `Err(UrlError::SchemeMismatch)` - The scheme differs from the seed's
    pub fn admit(&self, raw_url: &str) -> UrlResult<Url> {
        if !raw_url.starts_with(&self.base_url) {
            return Err(UrlError::OutOfScope(raw_url.to_string()));
        }

        let url = Url::parse(raw_url).map_err(|e| UrlError::Parse(e.to_string()))?;

        if url.scheme() != self.scheme {
            return Err(UrlError::SchemeMismatch {
                expected: self.scheme.clone(),
                found: url.scheme().to_string(),
            });
        }

        Ok(url)
    }
}
