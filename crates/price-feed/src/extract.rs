//! Price table extraction
//!
//! Scans the rows of the price table in document order and picks the first
//! row whose denomination matches the target label.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::FeedError;
use crate::types::PriceRow;
use crate::Result;

/// Default selector for the denomination rows on the source page
pub const DEFAULT_ROW_SELECTOR: &str = "table.lm-table tbody tr";

/// Extracts [`PriceRow`] candidates from page markup.
///
/// Selectors are compiled once at construction, so a bad selector is a
/// configuration error rather than a refresh-time failure.
#[derive(Debug)]
pub struct TableExtractor {
    row_selector: Selector,
    cell_selector: Selector,
    selector_text: String,
}

impl TableExtractor {
    /// Create an extractor for the given row selector
    pub fn new(row_selector: &str) -> Result<Self> {
        let rows = Selector::parse(row_selector).map_err(|e| FeedError::Selector {
            selector: row_selector.to_string(),
            message: e.to_string(),
        })?;
        let cells = Selector::parse("td").map_err(|e| FeedError::Selector {
            selector: "td".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            row_selector: rows,
            cell_selector: cells,
            selector_text: row_selector.to_string(),
        })
    }

    /// Row selector this extractor was built with
    pub fn selector(&self) -> &str {
        &self.selector_text
    }

    /// Lazily yield every row with at least three cells, in document order.
    ///
    /// Shorter rows are skipped silently.
    pub fn rows<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = PriceRow> + 'a {
        document
            .select(&self.row_selector)
            .filter_map(move |row| self.parse_row(row))
    }

    /// Find the first row whose denomination equals `label`.
    ///
    /// Comparison is case-insensitive, trimmed, with internal whitespace
    /// runs collapsed. Scanning stops at the first match.
    pub fn find(&self, markup: &str, label: &str) -> Result<PriceRow> {
        let document = Html::parse_document(markup);
        let wanted = normalize_label(label);

        let mut scanned = 0usize;
        let found = self
            .rows(&document)
            .inspect(|_| scanned += 1)
            .find(|row| normalize_label(&row.gramasi) == wanted);

        debug!(scanned, label, matched = found.is_some(), "Scanned price table");

        found.ok_or_else(|| FeedError::NotFound {
            label: label.to_string(),
        })
    }

    // Denomination, sell, buy; extra cells are ignored
    fn parse_row(&self, row: ElementRef<'_>) -> Option<PriceRow> {
        let mut cells = row.select(&self.cell_selector).map(cell_text);

        let gramasi = cells.next()?;
        let harga_jual = cells.next()?;
        let harga_beli = cells.next()?;

        Some(PriceRow {
            gramasi,
            harga_jual,
            harga_beli,
        })
    }
}

/// Cell text with whitespace runs collapsed and trimmed
fn cell_text(cell: ElementRef<'_>) -> String {
    collapse_ws(&cell.text().collect::<String>())
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_label(s: &str) -> String {
    collapse_ws(s).to_lowercase()
}
