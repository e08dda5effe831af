//! Restaurant-Harvest main entry point
//!
//! This is the command-line interface for the Restaurant-Harvest crawler.

use clap::Parser;
use restaurant_harvest::config::{load_config_with_hash, validate, Config, OutputMode};
use restaurant_harvest::crawler::harvest;
use restaurant_harvest::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Restaurant-Harvest: a restaurant-directory harvester
///
/// Walks every listing page of the guide, fetches each restaurant's detail
/// page concurrently and appends one CSV row per restaurant.
#[derive(Parser, Debug)]
#[command(name = "restaurant-harvest")]
#[command(version)]
#[command(about = "A restaurant-directory harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply without one)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the site base URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Override the CSV output path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Continue an existing CSV file instead of truncating it
    #[arg(long)]
    append: bool,

    /// Crawl at most this many listing pages
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);
    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_harvest(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("restaurant_harvest=info,warn"),
            1 => EnvFilter::new("restaurant_harvest=debug,info"),
            2 => EnvFilter::new("restaurant_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Command-line flags win over the configuration file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(base_url) = &cli.base_url {
        config.site.base_url = base_url.clone();
    }
    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }
    if cli.append {
        config.output.mode = OutputMode::Append;
    }
    if cli.max_pages.is_some() {
        config.crawler.max_pages = cli.max_pages;
    }
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Restaurant-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Listing: {}{}<n>", config.site.base_url, config.site.listing_path);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nCrawler:");
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Connect timeout: {}s", config.crawler.connect_timeout_secs);
    match config.crawler.max_pages {
        Some(n) => println!("  Max pages: {}", n),
        None => println!("  Max pages: all"),
    }

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  Mode: {:?}", config.output.mode);

    println!("\n✓ Configuration is valid");
}

/// Handles the main harvest operation
async fn handle_harvest(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting harvest of {} into {}",
        config.site.base_url,
        config.output.csv_path
    );

    match harvest(config).await {
        Ok(report) => {
            print_report(&report);
            println!("done");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
