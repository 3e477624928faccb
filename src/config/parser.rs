use crate::config::types::{Config, CrawlerConfig, HttpConfig, SettingsFile};
use crate::config::validation::{validate, validate_http_config};
use crate::ConfigResult;
use std::path::Path;

/// Loads HTTP client settings from a TOML file
///
/// Missing keys fall back to [`HttpConfig::default`]; a file without an
/// `[http]` table yields the defaults unchanged.
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(HttpConfig)` - Successfully loaded and validated settings
/// * `Err(ConfigError)` - Failed to read, parse, or validate the file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use link_census::config::load_http_config;
///
/// let http = load_http_config(Path::new("census.toml")).unwrap();
/// println!("User agent: {}", http.user_agent);
/// ```
pub fn load_http_config(path: &Path) -> ConfigResult<HttpConfig> {
    let content = std::fs::read_to_string(path)?;
    let settings: SettingsFile = toml::from_str(&content)?;
    validate_http_config(&settings.http)?;
    Ok(settings.http)
}

/// Assembles and validates a full configuration from the invocation arguments
///
/// # Arguments
///
/// * `base_url` - The seed URL
/// * `max_concurrency` - Size of the admission gate
/// * `max_pages` - Page budget
/// * `http` - HTTP client settings
pub fn build_config(
    base_url: &str,
    max_concurrency: u32,
    max_pages: u32,
    http: HttpConfig,
) -> ConfigResult<Config> {
    let config = Config {
        crawler: CrawlerConfig {
            base_url: base_url.to_string(),
            max_concurrency,
            max_pages,
        },
        http,
    };

    validate(&config)?;

    Ok(config)
}
