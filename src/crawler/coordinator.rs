//! Harvest coordinator - main crawl orchestration logic
//!
//! This module contains the run loop that ties the pipeline together:
//! - Initializing the sink and continuing its id sequence
//! - Resolving the page count once
//! - Walking listing pages strictly in order, one at a time
//! - Fetching each page's details as one all-or-nothing batch
//! - Assembling and appending the page's records
//!
//! Any error ends the run. Pages already appended stay in the sink.

use crate::config::Config;
use crate::crawler::pagination::last_page;
use crate::crawler::Fetcher;
use crate::output::{CrawlReport, RecordSink};
use crate::record::{assemble, IdSequence};
use crate::{HarvestError, SinkError};
use chrono::Utc;

/// Main harvester structure
///
/// Owns everything a run shares: the fetcher (and its connection pool), the
/// sink and the id sequence. Only the coordinating task touches the sink and
/// the ids, after a batch has fully resolved.
pub struct Harvester<S: RecordSink> {
    fetcher: Fetcher,
    sink: S,
    ids: IdSequence,
    max_pages: Option<u32>,
}

impl<S: RecordSink> Harvester<S> {
    /// Creates a new harvester
    ///
    /// # Arguments
    ///
    /// * `config` - The harvester configuration
    /// * `sink` - Destination for records; initialized by [`run`](Self::run)
    pub fn new(config: &Config, sink: S) -> Result<Self, HarvestError> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
            sink,
            ids: IdSequence::new(),
            max_pages: config.crawler.max_pages,
        })
    }

    /// Runs the harvest
    ///
    /// 1. Initializes the sink (header written once)
    /// 2. Reads the page count from listing page 1
    /// 3. Processes pages `1..=page_count - 1` in order
    pub async fn run(&mut self) -> Result<CrawlReport, HarvestError> {
        let started_at = Utc::now();

        self.sink.initialize()?;
        let resume_after = self.sink.last_id();
        self.ids =
            IdSequence::after(resume_after).ok_or(SinkError::IdsExhausted(resume_after))?;
        let first_id = self.ids.peek();

        let page_count = self.fetcher.resolve_page_count().await?;
        let last = last_page(page_count, self.max_pages);
        tracing::info!(
            "Listing reports {} pages, crawling pages 1 to {}",
            page_count,
            last
        );

        let mut pages_visited = 0;
        let mut records_written = 0;

        for page in 1..=last {
            let written = match self.process_page(page, last).await {
                Ok(n) => n,
                Err(e) => {
                    tracing::error!("Page {} failed: {}", page, e);
                    return Err(e);
                }
            };

            pages_visited += 1;
            records_written += written as u64;
        }

        let (first_id, last_id) = if records_written > 0 {
            (Some(first_id), Some(self.ids.peek() - 1))
        } else {
            (None, None)
        };

        let report = CrawlReport {
            started_at,
            finished_at: Utc::now(),
            page_count,
            pages_visited,
            records_written,
            first_id,
            last_id,
        };

        tracing::info!(
            "Harvest completed: {} records from {} pages in {}s",
            report.records_written,
            report.pages_visited,
            report.duration().num_seconds()
        );

        Ok(report)
    }

    /// Fetches, extracts and appends one listing page
    ///
    /// Returns the number of records written. Nothing reaches the sink unless
    /// every detail page of the listing page was fetched and extracted.
    async fn process_page(&mut self, page: u32, last: u32) -> Result<usize, HarvestError> {
        let urls = self.fetcher.list_detail_urls(page).await?;
        tracing::info!("Page {}/{}: {} restaurants", page, last, urls.len());

        if urls.is_empty() {
            return Ok(0);
        }

        let documents = self.fetcher.fetch_all(&urls).await?;
        tracing::debug!("Page {}: batch of {} resolved", page, documents.len());

        let records = assemble(&documents, &mut self.ids)?;
        self.sink.append(&records)?;

        if let (Some(head), Some(tail)) = (records.first(), records.last()) {
            tracing::debug!("Page {}: appended ids {}..={}", page, head.id, tail.id);
        }

        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RestaurantRecord;

    struct FullSink;

    impl RecordSink for FullSink {
        fn initialize(&mut self) -> Result<(), SinkError> {
            Ok(())
        }

        fn append(&mut self, _records: &[RestaurantRecord]) -> Result<(), SinkError> {
            Ok(())
        }

        fn last_id(&self) -> u64 {
            u64::MAX
        }
    }

    #[tokio::test]
    async fn test_exhausted_sink_stops_before_fetching() {
        let mut config = Config::default();
        config.site.base_url = "http://127.0.0.1:9/".to_string();

        let mut harvester = Harvester::new(&config, FullSink).unwrap();
        let result = harvester.run().await;

        assert!(matches!(
            result,
            Err(HarvestError::Sink(SinkError::IdsExhausted(u64::MAX)))
        ));
    }
}
