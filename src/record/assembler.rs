//! Record assembly and id sequencing

use crate::extract::extract_fields;
use crate::record::RestaurantRecord;
use crate::ExtractionError;
use scraper::Html;

/// Run-scoped id generator
///
/// Owned by the run and lent to [`assemble`]; ids are handed out strictly
/// increasing with no gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Sequence starting at 1
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Sequence continuing after `last_id` (0 means nothing written yet)
    ///
    /// `None` when `last_id` is `u64::MAX`.
    pub fn after(last_id: u64) -> Option<Self> {
        last_id.checked_add(1).map(|next| Self { next })
    }

    /// The id the next record will receive
    pub fn peek(&self) -> u64 {
        self.next
    }

    fn take(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts every document and stamps ids in input order
///
/// All documents are extracted before any id is taken, so a malformed page
/// leaves `ids` untouched.
pub fn assemble(
    documents: &[Html],
    ids: &mut IdSequence,
) -> Result<Vec<RestaurantRecord>, ExtractionError> {
    let fields = documents
        .iter()
        .map(extract_fields)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(fields
        .into_iter()
        .map(|f| RestaurantRecord::new(ids.take(), f))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Distinction;

    fn detail_page(name: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body>
            <ol><li class="breadcrumb-item">Home</li><li class="breadcrumb-item">Mexico</li>
            <li class="breadcrumb-item">Oaxaca</li></ol>
            <h1 class="data-sheet__title">{}</h1>
            <div class="data-sheet__block--text">Calle 5, Oaxaca, 68000, Mexico</div>
            <div class="data-sheet__block--text">$$ · Oaxacan</div>
            </body></html>"#,
            name
        ))
    }

    #[test]
    fn test_ids_start_at_one() {
        let docs = vec![detail_page("A"), detail_page("B"), detail_page("C")];
        let mut ids = IdSequence::new();

        let records = assemble(&docs, &mut ids).unwrap();

        let got: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(got, vec![1, 2, 3]);
        assert_eq!(records[1].name, "B");
        assert_eq!(records[0].distinction, Distinction::None);
        assert_eq!(ids.peek(), 4);
    }

    #[test]
    fn test_sequence_continues_across_batches() {
        let mut ids = IdSequence::new();

        let first = assemble(&[detail_page("A"), detail_page("B")], &mut ids).unwrap();
        let second = assemble(&[detail_page("C")], &mut ids).unwrap();

        assert_eq!(first.last().unwrap().id, 2);
        assert_eq!(second[0].id, 3);
    }

    #[test]
    fn test_empty_batch_takes_no_ids() {
        let mut ids = IdSequence::after(10).unwrap();
        let records = assemble(&[], &mut ids).unwrap();
        assert!(records.is_empty());
        assert_eq!(ids.peek(), 11);
    }

    #[test]
    fn test_after_last_possible_id() {
        assert_eq!(IdSequence::after(u64::MAX - 1).unwrap().peek(), u64::MAX);
        assert!(IdSequence::after(u64::MAX).is_none());
    }

    #[test]
    fn test_failed_extraction_consumes_no_ids() {
        let broken = Html::parse_document("<html><body><p>gone</p></body></html>");
        let mut ids = IdSequence::new();

        let result = assemble(&[detail_page("A"), broken], &mut ids);

        assert!(result.is_err());
        assert_eq!(ids.peek(), 1);
    }
}
