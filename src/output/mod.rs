//! Output module for persisting harvested records
//!
//! This module handles:
//! - The append-only record sink interface
//! - The CSV sink writing the fixed eight-column schema
//! - The end-of-run report

mod csv_sink;
pub mod stats;
mod traits;

pub use csv_sink::CsvSink;
pub use stats::{print_report, CrawlReport};
pub use traits::RecordSink;
