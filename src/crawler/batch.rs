//! Concurrent all-or-nothing detail fetching
//!
//! Every link of one listing page is fetched in its own task. The batch
//! succeeds only if every task does; the first failure aborts the rest.

use crate::crawler::fetcher::{fetch_body, parse_document};
use crate::crawler::Fetcher;
use crate::BatchError;
use scraper::Html;
use tokio::task::JoinSet;

impl Fetcher {
    /// Fetches all `hrefs` concurrently and returns their documents in input order
    ///
    /// There is no concurrency cap; one task per link is spawned up front.
    /// If any fetch fails, the in-flight siblings are aborted and the failure
    /// is returned as [`BatchError::Member`].
    pub async fn fetch_all(&self, hrefs: &[String]) -> Result<Vec<Html>, BatchError> {
        let total = hrefs.len();
        let mut tasks = JoinSet::new();

        for (index, href) in hrefs.iter().enumerate() {
            let url = self
                .resolve(href)
                .map_err(|source| BatchError::Member {
                    index,
                    total,
                    source,
                })?;
            let client = self.client().clone();

            tasks.spawn(async move { (index, fetch_body(&client, url).await) });
        }

        let mut bodies: Vec<Option<String>> = vec![None; total];

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(body))) => bodies[index] = Some(body),
                Ok((index, Err(source))) => {
                    tasks.abort_all();
                    tracing::warn!(
                        "Fetch {} of {} failed, aborting remaining fetches",
                        index + 1,
                        total
                    );
                    return Err(BatchError::Member {
                        index,
                        total,
                        source,
                    });
                }
                Err(e) => {
                    tasks.abort_all();
                    return Err(BatchError::TaskFailed(e.to_string()));
                }
            }
        }

        let bodies = bodies
            .into_iter()
            .collect::<Option<Vec<String>>>()
            .ok_or_else(|| BatchError::TaskFailed("fetch result missing".to_string()))?;

        Ok(bodies.iter().map(|body| parse_document(body)).collect())
    }
}
