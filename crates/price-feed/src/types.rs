//! Price feed data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the denomination price table.
///
/// Prices stay strings: once normalized they are digit-only, and callers
/// decide how to interpret them numerically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRow {
    /// Denomination label as shown on the page (e.g. "1gram")
    pub gramasi: String,
    /// Sell price
    pub harga_jual: String,
    /// Buy-back price
    pub harga_beli: String,
}

impl PriceRow {
    pub fn new(
        gramasi: impl Into<String>,
        harga_jual: impl Into<String>,
        harga_beli: impl Into<String>,
    ) -> Self {
        Self {
            gramasi: gramasi.into(),
            harga_jual: harga_jual.into(),
            harga_beli: harga_beli.into(),
        }
    }
}

/// The cached outcome of the latest refresh.
///
/// Entries are immutable; a refresh builds a new one and replaces the old
/// one whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CacheEntry {
    /// No refresh has completed yet
    #[default]
    Uninitialized,
    /// Latest refresh found the target row
    Success {
        source_url: String,
        fetched_at: DateTime<Utc>,
        row: PriceRow,
    },
    /// Latest refresh failed
    Error {
        message: String,
        failed_at: DateTime<Utc>,
        /// Last-known-good row, if any refresh ever succeeded
        previous_row: Option<PriceRow>,
    },
}

impl CacheEntry {
    /// Build a success entry stamped with the current time
    pub fn success(source_url: impl Into<String>, row: PriceRow) -> Self {
        CacheEntry::Success {
            source_url: source_url.into(),
            fetched_at: Utc::now(),
            row,
        }
    }

    /// Build an error entry that carries forward the last-known-good row of
    /// `previous` and nothing else.
    pub fn failure(message: impl Into<String>, previous: &CacheEntry) -> Self {
        CacheEntry::Error {
            message: message.into(),
            failed_at: Utc::now(),
            previous_row: previous.last_known_row().cloned(),
        }
    }

    /// Status label used on the wire
    pub fn status(&self) -> &'static str {
        match self {
            CacheEntry::Uninitialized => "uninitialized",
            CacheEntry::Success { .. } => "success",
            CacheEntry::Error { .. } => "error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CacheEntry::Success { .. })
    }

    /// The current row on success, or the carried row on error
    pub fn last_known_row(&self) -> Option<&PriceRow> {
        match self {
            CacheEntry::Uninitialized => None,
            CacheEntry::Success { row, .. } => Some(row),
            CacheEntry::Error { previous_row, .. } => previous_row.as_ref(),
        }
    }
}
