//! Field extraction from restaurant detail pages
//!
//! Every rule here mirrors the markup of the guide's detail page:
//! - Title heading for the name
//! - Two "info block" text nodes: location first, price/cuisine second
//! - Breadcrumb trail for the state
//! - Classification items for the award tiers
//!
//! Extraction is a pure function of one document. A document missing a
//! required element yields an [`ExtractionError`]; nothing is guessed.

mod classification;
mod cuisine;
mod fields;

pub use classification::{classify, classify_text};
pub use cuisine::{clean_cuisine_text, normalize_cuisine, normalize_tokens};
pub use fields::{extract_name, extract_state, info_blocks, split_location};

use crate::record::RestaurantFields;
use crate::ExtractionError;
use scraper::{ElementRef, Html, Selector};

pub(crate) const TITLE_SELECTOR: &str = "h1.data-sheet__title";
pub(crate) const INFO_BLOCK_SELECTOR: &str = "div.data-sheet__block--text";
pub(crate) const BREADCRUMB_SELECTOR: &str = "li.breadcrumb-item";
pub(crate) const CLASSIFICATION_SELECTOR: &str = "div.data-sheet__classification-item--content";

/// Compiles a CSS selector, reporting failures as extraction errors
pub(crate) fn selector(css: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|e| ExtractionError::InvalidSelector(format!("{}: {:?}", css, e)))
}

/// Concatenated text content of an element
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Extracts every persisted field except the id
///
/// # Example
///
/// ```
/// use restaurant_harvest::extract::extract_fields;
/// use scraper::Html;
///
/// let html = Html::parse_document(r#"
///     <li class="breadcrumb-item">Home</li>
///     <li class="breadcrumb-item">Mexico</li>
///     <li class="breadcrumb-item">Jalisco</li>
///     <h1 class="data-sheet__title"> Alcalde </h1>
///     <div class="data-sheet__block--text">Av. México 2903, Guadalajara, 44680, Mexico</div>
///     <div class="data-sheet__block--text">$$$ · Contemporary</div>
/// "#);
///
/// let fields = extract_fields(&html).unwrap();
/// assert_eq!(fields.name, "Alcalde");
/// assert_eq!(fields.zip_code, "44680");
/// assert_eq!(fields.state, "Jalisco");
/// ```
pub fn extract_fields(document: &Html) -> Result<RestaurantFields, ExtractionError> {
    let name = extract_name(document)?;

    let blocks = info_blocks(document)?;
    let location = blocks
        .first()
        .ok_or(ExtractionError::MissingElement { field: "location" })?;
    let cuisine_text = blocks
        .get(1)
        .ok_or(ExtractionError::MissingElement { field: "cuisine" })?;

    let (country, zip_code) = split_location(location)?;
    let cuisine = normalize_cuisine(cuisine_text);
    let state = extract_state(document)?;
    let (distinction, sustainability) = classify(document)?;

    Ok(RestaurantFields {
        name,
        cuisine,
        country,
        state,
        zip_code,
        distinction,
        sustainability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Distinction, Sustainability};

    const FULL_PAGE: &str = r#"
        <html><body>
        <nav><ol class="breadcrumb">
            <li class="breadcrumb-item"><a href="/en">Home</a></li>
            <li class="breadcrumb-item"><a href="/en/mx">Mexico</a></li>
            <li class="breadcrumb-item"><a href="/en/mx/cdmx"> Mexico City </a></li>
            <li class="breadcrumb-item">Pujol</li>
        </ol></nav>
        <h1 class="data-sheet__title">
            Pujol
        </h1>
        <div class="data-sheet__block">
            <div class="data-sheet__block--text">Tennyson 133, Polanco, Mexico City, 11550, Mexico</div>
            <div class="data-sheet__block--text">
                $$$$
                ·
                Mexican, Contemporary
            </div>
        </div>
        <div class="data-sheet__classification">
            <div class="data-sheet__classification-item--content">Two Stars: Excellent cooking</div>
            <div class="data-sheet__classification-item--content">MICHELIN Green Star</div>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_extract_full_page() {
        let document = Html::parse_document(FULL_PAGE);
        let fields = extract_fields(&document).unwrap();

        assert_eq!(fields.name, "Pujol");
        assert_eq!(fields.cuisine, "Mexican, Contemporary");
        assert_eq!(fields.country, "Mexico");
        assert_eq!(fields.zip_code, "11550");
        assert_eq!(fields.state, "Mexico City");
        assert_eq!(fields.distinction, Distinction::TwoStars);
        assert_eq!(fields.sustainability, Sustainability::GreenStar);
    }

    #[test]
    fn test_missing_title_is_error() {
        let document = Html::parse_document(
            r#"<div class="data-sheet__block--text">a, b</div>
               <div class="data-sheet__block--text">c</div>"#,
        );
        assert!(matches!(
            extract_fields(&document),
            Err(ExtractionError::MissingElement { field: "name" })
        ));
    }

    #[test]
    fn test_single_info_block_is_error() {
        let document = Html::parse_document(
            r#"<h1 class="data-sheet__title">X</h1>
               <div class="data-sheet__block--text">a, b</div>"#,
        );
        assert!(matches!(
            extract_fields(&document),
            Err(ExtractionError::MissingElement { field: "cuisine" })
        ));
    }

    #[test]
    fn test_selector_rejects_garbage() {
        assert!(matches!(
            selector("div[["),
            Err(ExtractionError::InvalidSelector(_))
        ));
    }
}
