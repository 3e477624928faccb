//! Link-Census main entry point
//!
//! This is the command-line interface for the Link-Census site crawler.

use clap::Parser;
use link_census::config::{build_config, load_http_config, Config, HttpConfig};
use link_census::crawler::crawl;
use link_census::output::print_statistics;
use link_census::render_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Link-Census: a bounded single-site link counter
///
/// Link-Census crawls one website from a seed URL, follows internal links
/// with bounded concurrency, and reports how many internal links point at
/// each page it visited.
#[derive(Parser, Debug)]
#[command(name = "link-census")]
#[command(version = "1.0.0")]
#[command(about = "A bounded single-site link counter", long_about = None)]
struct Cli {
    /// Seed URL; only links starting with it are followed
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Maximum number of pages processed at once
    #[arg(value_name = "MAX_CONCURRENCY")]
    max_concurrency: u32,

    /// Maximum number of distinct pages visited
    #[arg(value_name = "MAX_PAGES")]
    max_pages: u32,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to a TOML file with HTTP client settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print task outcome statistics to stderr after the report
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,

    /// Validate the settings and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load_config(&cli) {
        Ok(cfg) => {
            tracing::debug!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config, cli.stats).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_census=info,warn"),
            1 => EnvFilter::new("link_census=debug,info"),
            2 => EnvFilter::new("link_census=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Combines the positional arguments with the optional settings file
fn load_config(cli: &Cli) -> Result<Config, link_census::ConfigError> {
    let http = match &cli.config {
        Some(path) => {
            tracing::info!("Loading HTTP settings from: {}", path.display());
            load_http_config(path)?
        }
        None => HttpConfig::default(),
    };

    build_config(&cli.seed, cli.max_concurrency, cli.max_pages, http)
}

/// Handles the --dry-run mode: shows the validated settings
fn handle_dry_run(config: &Config) {
    println!("=== Link-Census Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", config.crawler.base_url);
    println!("  Max concurrency: {}", config.crawler.max_concurrency);
    println!("  Max pages: {}", config.crawler.max_pages);

    println!("\nHTTP Client:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Request timeout: {}s", config.http.request_timeout);
    println!("  Connect timeout: {}s", config.http.connect_timeout);
    println!("  Max redirects: {}", config.http.max_redirects);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, show_stats: bool) -> Result<(), Box<dyn std::error::Error>> {
    let result = match crawl(config).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    print!("{}", render_report(&result.pages, &config.crawler.base_url));

    if show_stats {
        eprintln!();
        print_statistics(&result.stats);
    }

    Ok(())
}
