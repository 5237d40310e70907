//! Daily market summary
//!
//! The summary is generated by the refresh worker right after the price job
//! and cached in its own [`Slot`]; the HTTP layer only ever reads it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use price_feed::metrics::RefreshMetrics;
use price_feed::{CacheStore, PriceRow, Refreshable, Slot};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::error::AdvisorError;
use crate::generator::TextGenerator;
use crate::prompts;

/// Latest market summary outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MarketSummary {
    /// No summary generated yet
    #[default]
    Uninitialized,

    Success {
        summary: String,
        generated_at: DateTime<Utc>,
        /// Price row the summary was written against
        basis: Option<PriceRow>,
    },

    /// Last generation failed
    Error {
        message: String,
        failed_at: DateTime<Utc>,
        previous_summary: Option<String>,
    },
}

impl MarketSummary {
    pub fn success(summary: impl Into<String>, basis: Option<PriceRow>) -> Self {
        MarketSummary::Success {
            summary: summary.into(),
            generated_at: Utc::now(),
            basis,
        }
    }

    /// Failure entry keeping only the last known summary text
    pub fn failure(message: impl Into<String>, previous: &MarketSummary) -> Self {
        MarketSummary::Error {
            message: message.into(),
            failed_at: Utc::now(),
            previous_summary: previous.last_known_summary().map(str::to_string),
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            MarketSummary::Uninitialized => "uninitialized",
            MarketSummary::Success { .. } => "success",
            MarketSummary::Error { .. } => "error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MarketSummary::Success { .. })
    }

    pub fn last_known_summary(&self) -> Option<&str> {
        match self {
            MarketSummary::Uninitialized => None,
            MarketSummary::Success { summary, .. } => Some(summary),
            MarketSummary::Error {
                previous_summary, ..
            } => previous_summary.as_deref(),
        }
    }
}

/// Single-slot market summary cache
pub type SummaryStore = Slot<MarketSummary>;

/// Generates the market summary from the cached price and stores it
pub struct MarketSummaryRefresher {
    generator: Arc<dyn TextGenerator>,
    prices: Arc<CacheStore>,
    store: Arc<SummaryStore>,
    metrics: RefreshMetrics,
}

impl MarketSummaryRefresher {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        prices: Arc<CacheStore>,
        store: Arc<SummaryStore>,
    ) -> Self {
        Self {
            generator,
            prices,
            store,
            metrics: RefreshMetrics::new("market_summary"),
        }
    }

    pub fn store(&self) -> Arc<SummaryStore> {
        Arc::clone(&self.store)
    }

    /// Generate once and replace the cached summary. Never fails.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> MarketSummary {
        let started = Instant::now();
        let basis = self.prices.read().last_known_row().cloned();
        let prompt = prompts::market_summary_prompt(basis.as_ref());

        let entry = match self.generator.generate_text(&prompt).await {
            Ok(text) => {
                self.metrics.success(started.elapsed());
                info!(chars = text.len(), has_basis = basis.is_some(), "Market summary generated");
                MarketSummary::success(text.trim(), basis)
            }
            Err(e) => {
                self.metrics.failure(failure_kind(&e), started.elapsed());
                warn!(error = %e, "Market summary generation failed");
                MarketSummary::failure(e.to_string(), &self.store.read())
            }
        };

        self.store.write(entry.clone());
        entry
    }
}

fn failure_kind(error: &AdvisorError) -> &'static str {
    match error {
        AdvisorError::NotConfigured => "not_configured",
        AdvisorError::Upstream(_) => "upstream",
        AdvisorError::InvalidInput(_) => "invalid_input",
        AdvisorError::Client(_) => "client",
    }
}

#[async_trait]
impl Refreshable for MarketSummaryRefresher {
    fn name(&self) -> &str {
        "market_summary"
    }

    async fn run(&self) -> bool {
        self.refresh().await.is_success()
    }
}
