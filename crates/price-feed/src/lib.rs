//! Gold price feed for Goldfeed
//!
//! This crate scrapes the denomination price table from the source site,
//! normalizes the price cells and keeps the latest outcome in a single-slot
//! cache that the HTTP layer reads on every request.
//!
//! # Core Components
//!
//! - [`extract`] - Price table scanning and target-row selection
//! - [`normalize`] - Digit-only normalization of price cells
//! - [`store`] - Single-slot, replace-whole-entry cache
//! - [`source`] - Page fetching (`PageSource` trait + reqwest implementation)
//! - [`refresh`] - Refresh orchestrator that turns every outcome into a cache entry
//! - [`schedule`] - Daily wall-clock schedule
//! - [`worker`] - Background worker running refresh jobs on startup and daily
//!
//! # Key Invariants
//!
//! - Readers always observe a fully-formed [`CacheEntry`]
//! - A refresh never fails past its own boundary; every outcome is a store write
//! - A failed refresh keeps the last-known-good row and nothing else

pub mod error;
pub mod extract;
pub mod metrics;
pub mod normalize;
pub mod refresh;
pub mod schedule;
pub mod source;
pub mod store;
pub mod types;
pub mod worker;

pub use error::FeedError;
pub use extract::TableExtractor;
pub use normalize::normalize_price;
pub use refresh::{FeedSettings, RefreshOrchestrator};
pub use schedule::DailySchedule;
pub use source::{HttpPageSource, PageSource};
pub use store::{CacheStore, Slot};
pub use types::{CacheEntry, PriceRow};
pub use worker::{Refreshable, RefreshWorker, WorkerSettings};

/// Result type for feed operations
pub type Result<T> = std::result::Result<T, FeedError>;
