//! End-of-run report
//!
//! Collected by the coordinator while it walks the listing and printed by the
//! binary once the run succeeds.

use chrono::{DateTime, Duration, Utc};

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the last page was written
    pub finished_at: DateTime<Utc>,

    /// Page count read from the index control (one more than pages crawled)
    pub page_count: u32,

    /// Listing pages actually processed
    pub pages_visited: u32,

    /// Rows appended during this run
    pub records_written: u64,

    /// First id written this run, if any
    pub first_id: Option<u64>,

    /// Last id written this run, if any
    pub last_id: Option<u64>,
}

impl CrawlReport {
    pub fn duration(&self) -> Duration {
        self.finished_at - self.started_at
    }
}

/// Prints the report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Harvest Report ===\n");

    println!("Timing:");
    println!("  Started:  {}", report.started_at.to_rfc3339());
    println!("  Finished: {}", report.finished_at.to_rfc3339());
    println!("  Duration: {}s", report.duration().num_seconds());
    println!();

    println!("Pages:");
    println!("  Page count reported: {}", report.page_count);
    println!("  Listing pages crawled: {}", report.pages_visited);
    println!();

    println!("Records:");
    println!("  Written: {}", report.records_written);
    match (report.first_id, report.last_id) {
        (Some(first), Some(last)) => println!("  Ids: {}..={}", first, last),
        _ => println!("  Ids: none"),
    }
}
