//! Positional field rules: name, location and state

use crate::extract::{
    element_text, selector, BREADCRUMB_SELECTOR, INFO_BLOCK_SELECTOR, TITLE_SELECTOR,
};
use crate::ExtractionError;
use scraper::Html;

/// Breadcrumb position holding the state (Home > Country > State > ...)
const STATE_BREADCRUMB_INDEX: usize = 2;

/// Text of the title heading, trimmed
pub fn extract_name(document: &Html) -> Result<String, ExtractionError> {
    let title = selector(TITLE_SELECTOR)?;

    document
        .select(&title)
        .next()
        .map(|element| element_text(&element).trim().to_string())
        .ok_or(ExtractionError::MissingElement { field: "name" })
}

/// Raw text of every info block, in document order
pub fn info_blocks(document: &Html) -> Result<Vec<String>, ExtractionError> {
    let block = selector(INFO_BLOCK_SELECTOR)?;
    Ok(document
        .select(&block)
        .map(|element| element_text(&element))
        .collect())
}

/// Splits a location line into `(country, zip_code)`
///
/// The country is the last comma-delimited segment and the zip code the one
/// before it. Street and city parts are ignored.
///
/// ```
/// use restaurant_harvest::extract::split_location;
///
/// let (country, zip) = split_location("123 Main St, Mexico City, 06700, Mexico").unwrap();
/// assert_eq!(country, "Mexico");
/// assert_eq!(zip, "06700");
/// ```
pub fn split_location(text: &str) -> Result<(String, String), ExtractionError> {
    let segments: Vec<&str> = text.trim().split(',').map(str::trim).collect();

    if segments.len() < 2 {
        return Err(ExtractionError::TooFewSegments {
            field: "location",
            found: segments.len(),
            expected: 2,
        });
    }

    let country = segments[segments.len() - 1].to_string();
    let zip_code = segments[segments.len() - 2].to_string();
    Ok((country, zip_code))
}

/// Third breadcrumb entry, trimmed
pub fn extract_state(document: &Html) -> Result<String, ExtractionError> {
    let item = selector(BREADCRUMB_SELECTOR)?;
    let crumbs: Vec<String> = document
        .select(&item)
        .map(|element| element_text(&element))
        .collect();

    crumbs
        .get(STATE_BREADCRUMB_INDEX)
        .map(|crumb| crumb.trim().to_string())
        .ok_or(ExtractionError::TooFewSegments {
            field: "state",
            found: crumbs.len(),
            expected: STATE_BREADCRUMB_INDEX + 1,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_location_reference_example() {
        let (country, zip) = split_location("123 Main St, Mexico City, 06700, Mexico").unwrap();
        assert_eq!(country, "Mexico");
        assert_eq!(zip, "06700");
    }

    #[test]
    fn test_split_location_two_segments() {
        let (country, zip) = split_location("  06700 ,Mexico \n").unwrap();
        assert_eq!(country, "Mexico");
        assert_eq!(zip, "06700");
    }

    #[test]
    fn test_split_location_without_comma_fails() {
        assert!(matches!(
            split_location("Mexico"),
            Err(ExtractionError::TooFewSegments {
                field: "location",
                found: 1,
                expected: 2
            })
        ));
    }

    #[test]
    fn test_extract_name_trims() {
        let document =
            Html::parse_document(r#"<h1 class="data-sheet__title">  Rosetta  </h1>"#);
        assert_eq!(extract_name(&document).unwrap(), "Rosetta");
    }

    #[test]
    fn test_extract_name_ignores_other_headings() {
        let document = Html::parse_document(
            r#"<h1>Guide</h1><h1 class="data-sheet__title">Contramar</h1>"#,
        );
        assert_eq!(extract_name(&document).unwrap(), "Contramar");
    }

    #[test]
    fn test_extract_state_third_crumb() {
        let document = Html::parse_document(
            r#"<ol>
                <li class="breadcrumb-item">Home</li>
                <li class="breadcrumb-item">Mexico</li>
                <li class="breadcrumb-item">
                    Baja California
                </li>
                <li class="breadcrumb-item">Valle de Guadalupe</li>
            </ol>"#,
        );
        assert_eq!(extract_state(&document).unwrap(), "Baja California");
    }

    #[test]
    fn test_extract_state_short_breadcrumb_fails() {
        let document = Html::parse_document(
            r#"<ol><li class="breadcrumb-item">Home</li><li class="breadcrumb-item">Mexico</li></ol>"#,
        );
        assert!(matches!(
            extract_state(&document),
            Err(ExtractionError::TooFewSegments { found: 2, .. })
        ));
    }

    #[test]
    fn test_info_blocks_in_document_order() {
        let document = Html::parse_document(
            r#"<div class="data-sheet__block--text">first</div>
               <div class="other">skip</div>
               <div class="data-sheet__block--text">second</div>"#,
        );
        assert_eq!(info_blocks(&document).unwrap(), vec!["first", "second"]);
    }
}
