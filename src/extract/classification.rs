//! Award tier matching

use crate::extract::{selector, CLASSIFICATION_SELECTOR};
use crate::record::{Distinction, Sustainability};
use crate::ExtractionError;
use scraper::Html;

/// Reads distinction and sustainability from the classification items
///
/// A page with no classification items gets the none-marker for both.
/// Matching runs over the serialized markup of all items, so an award name
/// in an attribute or nested tag counts as well.
pub fn classify(document: &Html) -> Result<(Distinction, Sustainability), ExtractionError> {
    let item = selector(CLASSIFICATION_SELECTOR)?;
    let serialized: Vec<String> = document.select(&item).map(|e| e.html()).collect();

    if serialized.is_empty() {
        return Ok((Distinction::None, Sustainability::None));
    }

    Ok(classify_text(&serialized.concat()))
}

/// Substring matching against the award vocabulary
///
/// The first tier of [`Distinction::MATCHED`] found wins; sustainability is
/// checked independently.
pub fn classify_text(text: &str) -> (Distinction, Sustainability) {
    let distinction = Distinction::MATCHED
        .iter()
        .copied()
        .find(|tier| text.contains(tier.as_str()))
        .unwrap_or(Distinction::None);

    let sustainability = if text.contains(Sustainability::GreenStar.as_str()) {
        Sustainability::GreenStar
    } else {
        Sustainability::None
    };

    (distinction, sustainability)
}
