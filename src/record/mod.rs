//! Persisted record types
//!
//! A [`RestaurantRecord`] is one CSV row. Its field order is the column order
//! of [`COLUMNS`] and must never change: existing files are appended to.

mod assembler;

pub use assembler::{assemble, IdSequence};

use serde::Serialize;
use std::fmt;

/// Sentinel written when a restaurant holds no award of a kind
pub const NONE_MARKER: &str = "-";

/// Header row, in persisted order
pub const COLUMNS: [&str; 8] = [
    "id",
    "name",
    "types of restaurants",
    "country",
    "state",
    "zip code",
    "distinction",
    "sustainability",
];

/// Culinary award tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Distinction {
    #[serde(rename = "-")]
    None,
    #[serde(rename = "Bib Gourmand")]
    BibGourmand,
    #[serde(rename = "One Star")]
    OneStar,
    #[serde(rename = "Two Stars")]
    TwoStars,
    /// Representable, but never produced by classification matching
    #[serde(rename = "Three Stars")]
    ThreeStars,
}

impl Distinction {
    /// Tiers recognised in classification text, in priority order
    ///
    /// `ThreeStars` is deliberately absent; restaurants holding it are
    /// recorded with the none-marker.
    pub const MATCHED: [Distinction; 3] = [
        Distinction::BibGourmand,
        Distinction::OneStar,
        Distinction::TwoStars,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => NONE_MARKER,
            Self::BibGourmand => "Bib Gourmand",
            Self::OneStar => "One Star",
            Self::TwoStars => "Two Stars",
            Self::ThreeStars => "Three Stars",
        }
    }
}

impl fmt::Display for Distinction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sustainability award, independent of [`Distinction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sustainability {
    #[serde(rename = "-")]
    None,
    #[serde(rename = "Green Star")]
    GreenStar,
}

impl Sustainability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => NONE_MARKER,
            Self::GreenStar => "Green Star",
        }
    }
}

impl fmt::Display for Sustainability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields extracted from one detail page, before an id is assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantFields {
    pub name: String,
    pub cuisine: String,
    pub country: String,
    pub state: String,
    pub zip_code: String,
    pub distinction: Distinction,
    pub sustainability: Sustainability,
}

/// One persisted row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestaurantRecord {
    pub id: u64,
    pub name: String,
    #[serde(rename = "types of restaurants")]
    pub cuisine: String,
    pub country: String,
    pub state: String,
    #[serde(rename = "zip code")]
    pub zip_code: String,
    pub distinction: Distinction,
    pub sustainability: Sustainability,
}

impl RestaurantRecord {
    pub fn new(id: u64, fields: RestaurantFields) -> Self {
        Self {
            id,
            name: fields.name,
            cuisine: fields.cuisine,
            country: fields.country,
            state: fields.state,
            zip_code: fields.zip_code,
            distinction: fields.distinction,
            sustainability: fields.sustainability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serialized_names() {
        assert_eq!(Distinction::None.to_string(), "-");
        assert_eq!(Distinction::BibGourmand.to_string(), "Bib Gourmand");
        assert_eq!(Distinction::TwoStars.to_string(), "Two Stars");
        assert_eq!(Sustainability::GreenStar.to_string(), "Green Star");
        assert_eq!(Sustainability::None.to_string(), NONE_MARKER);
    }

    #[test]
    fn test_three_stars_not_matched() {
        assert!(!Distinction::MATCHED.contains(&Distinction::ThreeStars));
    }

    #[test]
    fn test_record_serializes_in_column_order() {
        let record = RestaurantRecord {
            id: 7,
            name: "Quintonil".to_string(),
            cuisine: "Mexican".to_string(),
            country: "Mexico".to_string(),
            state: "Mexico City".to_string(),
            zip_code: "11550".to_string(),
            distinction: Distinction::TwoStars,
            sustainability: Sustainability::GreenStar,
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(Vec::new());
        writer.serialize(&record).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some(COLUMNS.join(",").as_str()));
        assert_eq!(
            lines.next(),
            Some("7,Quintonil,Mexican,Mexico,Mexico City,11550,Two Stars,Green Star")
        );
    }
}
