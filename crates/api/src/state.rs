//! Shared handler state

use advisor::{Advisor, SummaryStore};
use price_feed::CacheStore;
use std::sync::Arc;

/// Everything the handlers need, cloned per request
#[derive(Clone)]
pub struct AppState {
    pub prices: Arc<CacheStore>,
    pub summaries: Arc<SummaryStore>,
    pub advisor: Advisor,
}

impl AppState {
    pub fn new(prices: Arc<CacheStore>, summaries: Arc<SummaryStore>, advisor: Advisor) -> Self {
        Self {
            prices,
            summaries,
            advisor,
        }
    }
}
