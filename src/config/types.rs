use serde::Deserialize;

/// Main configuration structure for Link-Census
#[derive(Debug, Clone)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
}

/// Crawl budget configuration, taken from the positional arguments
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Seed URL exactly as given; also the textual scope prefix
    pub base_url: String,

    /// Maximum number of simultaneously admitted crawl tasks
    pub max_concurrency: u32,

    /// Maximum number of distinct pages claimed during the run
    pub max_pages: u32,
}

/// HTTP client settings, optionally loaded from the `[http]` table of a TOML file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    pub request_timeout: u64,

    /// Connection establishment timeout (seconds)
    pub connect_timeout: u64,

    /// Redirect hops followed before giving up
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("link-census/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: 30,
            connect_timeout: 10,
            max_redirects: 10,
        }
    }
}

/// Layout of the optional settings file
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SettingsFile {
    #[serde(default)]
    pub http: HttpConfig,
}
