//! Refresh orchestrator
//!
//! Fetch → extract → normalize → store. Every outcome, good or bad, ends in
//! exactly one store write; nothing propagates to the caller.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::extract::{TableExtractor, DEFAULT_ROW_SELECTOR};
use crate::metrics::RefreshMetrics;
use crate::normalize::normalize_price;
use crate::source::PageSource;
use crate::store::CacheStore;
use crate::types::{CacheEntry, PriceRow};
use crate::worker::Refreshable;
use crate::Result;

/// Default source page
pub const DEFAULT_SOURCE_URL: &str = "https://anekalogam.co.id/id";

/// Default denomination to select
pub const DEFAULT_TARGET_LABEL: &str = "1gram";

/// What to scrape and which row to keep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    pub source_url: String,
    pub row_selector: String,
    pub target_label: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            row_selector: DEFAULT_ROW_SELECTOR.to_string(),
            target_label: DEFAULT_TARGET_LABEL.to_string(),
        }
    }
}

/// Runs one scrape and records the outcome in the [`CacheStore`]
pub struct RefreshOrchestrator {
    settings: FeedSettings,
    extractor: TableExtractor,
    source: Arc<dyn PageSource>,
    store: Arc<CacheStore>,
    metrics: RefreshMetrics,
}

impl RefreshOrchestrator {
    /// Create an orchestrator. Fails only on an invalid row selector.
    pub fn new(
        settings: FeedSettings,
        source: Arc<dyn PageSource>,
        store: Arc<CacheStore>,
    ) -> Result<Self> {
        let extractor = TableExtractor::new(&settings.row_selector)?;

        Ok(Self {
            settings,
            extractor,
            source,
            store,
            metrics: RefreshMetrics::new("price"),
        })
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    /// Shared handle to the store this orchestrator writes
    pub fn store(&self) -> Arc<CacheStore> {
        Arc::clone(&self.store)
    }

    /// Scrape once and replace the cache entry. Never fails; the written
    /// entry is returned.
    #[instrument(skip(self), fields(url = %self.settings.source_url, label = %self.settings.target_label))]
    pub async fn refresh(&self) -> CacheEntry {
        let started = Instant::now();

        let entry = match self.scrape().await {
            Ok(row) => {
                self.metrics.success(started.elapsed());
                info!(
                    gramasi = %row.gramasi,
                    harga_jual = %row.harga_jual,
                    harga_beli = %row.harga_beli,
                    "Price refresh succeeded"
                );
                CacheEntry::success(&self.settings.source_url, row)
            }
            Err(e) => {
                self.metrics.failure(e.kind(), started.elapsed());
                warn!(error = %e, kind = e.kind(), "Price refresh failed");
                CacheEntry::failure(e.to_string(), &self.store.read())
            }
        };

        self.store.write(entry.clone());
        entry
    }

    async fn scrape(&self) -> Result<PriceRow> {
        let body = self.source.fetch(&self.settings.source_url).await?;
        let raw = self.extractor.find(&body, &self.settings.target_label)?;

        Ok(PriceRow {
            harga_jual: normalize_price(&raw.harga_jual),
            harga_beli: normalize_price(&raw.harga_beli),
            gramasi: raw.gramasi,
        })
    }
}

#[async_trait]
impl Refreshable for RefreshOrchestrator {
    fn name(&self) -> &str {
        "price"
    }

    async fn run(&self) -> bool {
        self.refresh().await.is_success()
    }
}
