//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building the one HTTP client a run shares
//! - Resolving listing and detail paths against the base URL
//! - GET requests with status and body error classification
//! - Parsing bodies into `scraper` documents
//!
//! There is no retry: the first failure is returned to the caller.

use crate::config::{normalize_base_url, Config, CrawlerConfig, UserAgentConfig};
use crate::{FetchError, HarvestError};
use reqwest::{redirect::Policy, Client};
use scraper::Html;
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed per request
const MAX_REDIRECTS: usize = 10;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Identification sent with every request
/// * `crawler` - Timeouts
///
/// # Example
///
/// ```no_run
/// use restaurant_harvest::config::Config;
/// use restaurant_harvest::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.user_agent, &config.crawler).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        user_agent.crawler_name,
        user_agent.crawler_version,
        user_agent.contact_url,
        user_agent.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Parses a response body into a queryable document
///
/// Listing, pagination and detail documents all go through here, whichever
/// fetch mode produced the body.
pub fn parse_document(body: &str) -> Html {
    Html::parse_document(body)
}

/// GETs `url` and returns its body
///
/// Non-2xx statuses (after redirects) and undecodable bodies are errors.
pub async fn fetch_body(client: &Client, url: Url) -> Result<String, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })
}

/// Run-scoped document fetcher
///
/// Owns the HTTP client (and with it the connection pool) for the whole run,
/// plus the base URL everything is resolved against.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    base_url: Url,
    listing_path: String,
}

impl Fetcher {
    /// Builds a fetcher from configuration
    pub fn new(config: &Config) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        let base_url = normalize_base_url(&config.site.base_url)?;

        Ok(Self {
            client,
            base_url,
            listing_path: config.site.listing_path.clone(),
        })
    }

    /// Base URL, always ending with `/`
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    /// Resolves a link against the base URL with standard URL-join rules
    ///
    /// Relative paths land under the base path. Root-relative paths such as
    /// `/en/...` replace the base path entirely and keep only its origin,
    /// which is how the site's detail links are written.
    pub fn resolve(&self, href: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(href)
            .map_err(|source| FetchError::InvalidUrl {
                href: href.to_string(),
                base: self.base_url.to_string(),
                source,
            })
    }

    /// URL of a 1-based listing page: `<base><listing-path><page>`
    pub fn listing_url(&self, page: u32) -> Result<Url, FetchError> {
        self.resolve(&format!("{}{}", self.listing_path, page))
    }

    /// Fetches one document and waits for it
    pub async fn fetch_document(&self, url: &Url) -> Result<Html, FetchError> {
        tracing::debug!("GET {}", url);
        let body = fetch_body(&self.client, url.clone()).await?;
        Ok(parse_document(&body))
    }
}
