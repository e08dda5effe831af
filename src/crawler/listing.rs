//! Detail-link discovery on listing pages

use crate::crawler::Fetcher;
use crate::extract::selector;
use crate::{ExtractionError, HarvestError};
use scraper::Html;

/// The restaurant list on a listing page
const LISTING_CONTAINER: &str = "div.row.restaurant__list-row.js-restaurant__list_items";

/// Collects the `href` of every anchor inside the restaurant list
///
/// Anchors without an `href` are skipped. Order follows the document and
/// duplicates are kept. A page without the list yields an empty vector.
pub fn extract_detail_urls(document: &Html) -> Result<Vec<String>, ExtractionError> {
    let container_selector = selector(LISTING_CONTAINER)?;
    let anchor_selector = selector("a")?;

    let Some(container) = document.select(&container_selector).next() else {
        return Ok(Vec::new());
    };

    Ok(container
        .select(&anchor_selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
        .collect())
}

impl Fetcher {
    /// Loads listing page `page` and returns its detail links
    pub async fn list_detail_urls(&self, page: u32) -> Result<Vec<String>, HarvestError> {
        let url = self.listing_url(page)?;
        let document = self.fetch_document(&url).await?;
        let urls = extract_detail_urls(&document)?;

        if urls.is_empty() {
            tracing::warn!("No restaurant links found on {}", url);
        }

        Ok(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(inner: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body>
            <a href="/outside">not in list</a>
            <div class="row restaurant__list-row js-restaurant__list_items">{}</div>
            </body></html>"#,
            inner
        ))
    }

    #[test]
    fn test_links_in_document_order() {
        let document = listing(
            r#"<div class="card"><a class="link" href="/en/r/a">A</a></div>
               <div class="card"><a class="link" href="/en/r/b">B</a></div>"#,
        );
        assert_eq!(
            extract_detail_urls(&document).unwrap(),
            vec!["/en/r/a", "/en/r/b"]
        );
    }

    #[test]
    fn test_anchor_without_href_skipped() {
        let document = listing(
            r#"<a href="/en/r/a">A</a><a name="top">no link</a><a href="/en/r/c">C</a>"#,
        );
        let urls = extract_detail_urls(&document).unwrap();
        assert_eq!(urls.len(), 2);

        let with_href = document
            .select(&scraper::Selector::parse(&format!("{} a[href]", LISTING_CONTAINER)).unwrap())
            .count();
        assert_eq!(urls.len(), with_href);
    }

    #[test]
    fn test_duplicates_kept() {
        let document = listing(r#"<a href="/en/r/a">img</a><a href="/en/r/a">A</a>"#);
        assert_eq!(
            extract_detail_urls(&document).unwrap(),
            vec!["/en/r/a", "/en/r/a"]
        );
    }

    #[test]
    fn test_missing_container_is_empty() {
        let document = Html::parse_document(r#"<html><body><a href="/x">x</a></body></html>"#);
        assert!(extract_detail_urls(&document).unwrap().is_empty());
    }
}
