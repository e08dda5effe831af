//! Page-count discovery from the first listing page

use crate::crawler::Fetcher;
use crate::extract::selector;
use crate::PageCountError;
use scraper::Html;

/// Wrapper around the page-index control
const PAGE_INDEX_CONTAINER: &str = "div.search-results__column.col-lg-12";

/// One entry of the page-index control; classed items are controls
const PAGE_INDEX_ENTRY: &str = "li";

/// Reads the page count from a listing document
///
/// The site's index control lists every page except the last one, so the
/// count is the number of entries plus one. Only `li` items without a class
/// count as entries, so arrow buttons like `li.arrow` are skipped. `url` is
/// only used in errors.
pub fn count_pages(document: &Html, url: &str) -> Result<u32, PageCountError> {
    let container_selector = selector(PAGE_INDEX_CONTAINER)?;
    let entry_selector = selector(PAGE_INDEX_ENTRY)?;

    let container = document
        .select(&container_selector)
        .next()
        .ok_or_else(|| PageCountError::ContainerMissing {
            url: url.to_string(),
        })?;

    let entries = container
        .select(&entry_selector)
        .filter(|entry| entry.value().attr("class").map_or(true, str::is_empty))
        .count();
    if entries == 0 {
        return Err(PageCountError::NoEntries {
            url: url.to_string(),
        });
    }

    Ok(entries as u32 + 1)
}

/// Last listing page a run visits
///
/// Pages `1..=last_page(..)` are crawled: one fewer than the resolved page
/// count, optionally capped by `max_pages`.
pub fn last_page(page_count: u32, max_pages: Option<u32>) -> u32 {
    let last = page_count.saturating_sub(1);
    match max_pages {
        Some(cap) => last.min(cap),
        None => last,
    }
}

impl Fetcher {
    /// Loads listing page 1 and reads its page-index control
    pub async fn resolve_page_count(&self) -> Result<u32, PageCountError> {
        let url = self.listing_url(1)?;
        let document = self.fetch_document(&url).await?;
        count_pages(&document, url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_with_entries(k: usize) -> Html {
        let items: String = (1..=k)
            .map(|i| format!(r#"<li><a href="/en/mx/restaurants/page/{0}">{0}</a></li>"#, i))
            .collect();
        Html::parse_document(&format!(
            r#"<html><body>
            <div class="search-results__column col-lg-12"><ul class="pagination">{}</ul></div>
            </body></html>"#,
            items
        ))
    }

    #[test]
    fn test_count_is_entries_plus_one() {
        for k in [1, 4, 17] {
            let document = listing_with_entries(k);
            assert_eq!(count_pages(&document, "test").unwrap(), k as u32 + 1);
        }
    }

    #[test]
    fn test_loop_visits_one_through_k() {
        let document = listing_with_entries(5);
        let count = count_pages(&document, "test").unwrap();
        let visited: Vec<u32> = (1..=last_page(count, None)).collect();
        assert_eq!(visited, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_last_page_with_cap() {
        assert_eq!(last_page(10, Some(3)), 3);
        assert_eq!(last_page(3, Some(10)), 2);
        assert_eq!(last_page(0, None), 0);
    }

    #[test]
    fn test_classed_entries_not_counted() {
        let document = Html::parse_document(
            r#"<div class="search-results__column col-lg-12"><ul>
            <li><a href="?p=1">1</a></li>
            <li class=""><a href="?p=2">2</a></li>
            <li><a href="?p=3">3</a></li>
            <li class="arrow"><a href="?p=2">next</a></li>
            </ul></div>"#,
        );
        assert_eq!(count_pages(&document, "test").unwrap(), 4);
    }

    #[test]
    fn test_only_classed_entries_is_no_entries() {
        let document = Html::parse_document(
            r#"<div class="search-results__column col-lg-12"><ul>
            <li class="arrow"><a href="?p=2">next</a></li>
            </ul></div>"#,
        );
        assert!(matches!(
            count_pages(&document, "test"),
            Err(PageCountError::NoEntries { .. })
        ));
    }

    #[test]
    fn test_missing_container() {
        let document = Html::parse_document("<html><body><ul><li>1</li></ul></body></html>");
        assert!(matches!(
            count_pages(&document, "test"),
            Err(PageCountError::ContainerMissing { .. })
        ));
    }

    #[test]
    fn test_container_without_entries() {
        let document = Html::parse_document(
            r#"<div class="search-results__column col-lg-12"><p>no pages</p></div>"#,
        );
        assert!(matches!(
            count_pages(&document, "test"),
            Err(PageCountError::NoEntries { .. })
        ));
    }

    #[test]
    fn test_container_needs_both_classes() {
        let document = Html::parse_document(
            r#"<div class="search-results__column"><ul><li>1</li></ul></div>"#,
        );
        assert!(count_pages(&document, "test").is_err());
    }
}
