//! Crawler module for listing and detail page retrieval
//!
//! This module contains the crawl pipeline, including:
//! - HTTP fetching and document parsing
//! - Page-count discovery from the listing's index control
//! - Detail-link discovery on each listing page
//! - Concurrent all-or-nothing detail batches
//! - Overall harvest coordination

mod batch;
mod coordinator;
mod fetcher;
mod listing;
mod pagination;

pub use coordinator::Harvester;
pub use fetcher::{build_http_client, fetch_body, parse_document, Fetcher};
pub use listing::extract_detail_urls;
pub use pagination::{count_pages, last_page};

use crate::config::Config;
use crate::output::{CrawlReport, CsvSink};
use crate::HarvestError;

/// Runs a complete harvest into the configured CSV file
///
/// This is the main entry point for starting a harvest. It will:
/// 1. Build the HTTP client
/// 2. Create or reopen the CSV file
/// 3. Crawl every listing page and its detail pages
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Every page was written
/// * `Err(HarvestError)` - The first failure; earlier pages remain in the file
pub async fn harvest(config: &Config) -> Result<CrawlReport, HarvestError> {
    let sink = CsvSink::new(&config.output.csv_path, config.output.mode);
    let mut harvester = Harvester::new(config, sink)?;
    harvester.run().await
}
