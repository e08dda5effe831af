//! Restaurant-Harvest: a restaurant-directory harvester
//!
//! This crate walks the paginated listing of a restaurant guide, fetches every
//! restaurant's detail page, extracts a fixed set of fields and appends them to
//! a CSV file, one listing page at a time.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for Restaurant-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Page count error: {0}")]
    PageCount(#[from] PageCountError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Failure to retrieve one document
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Cannot resolve '{href}' against {base}: {source}")]
    InvalidUrl {
        href: String,
        base: String,
        source: ::url::ParseError,
    },

    #[error("Request to {url} failed: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

/// The listing's page-index control could not be read
#[derive(Debug, Error)]
pub enum PageCountError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Page-index container not found on {url}")]
    ContainerMissing { url: String },

    #[error("Page-index container on {url} has no entries")]
    NoEntries { url: String },

    #[error(transparent)]
    Selector(#[from] ExtractionError),
}

/// A detail document does not have the shape a required field expects
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Missing element for field '{field}'")]
    MissingElement { field: &'static str },

    #[error("Field '{field}' needs at least {expected} segments, found {found}")]
    TooFewSegments {
        field: &'static str,
        found: usize,
        expected: usize,
    },

    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),
}

/// Aggregate failure of a concurrent detail-fetch batch
///
/// `index` is 0-based; messages count from 1.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Fetch {} of {total} failed: {source}", .index + 1)]
    Member {
        index: usize,
        total: usize,
        source: FetchError,
    },

    #[error("Fetch task did not complete: {0}")]
    TaskFailed(String),
}

/// Errors from the record sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Existing file {path} has header {found:?}, expected {expected:?}")]
    HeaderMismatch {
        path: String,
        found: Vec<String>,
        expected: Vec<String>,
    },

    #[error("Existing file {path} has an unusable id '{value}'")]
    InvalidId { path: String, value: String },

    #[error("No ids left after {0}")]
    IdsExhausted(u64),

    #[error("Sink used before initialize()")]
    NotInitialized,
}

/// Result type alias for Restaurant-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Fetcher, Harvester};
pub use output::{CrawlReport, CsvSink, RecordSink};
pub use record::{Distinction, IdSequence, RestaurantRecord, Sustainability};
