//! AI advisor for Goldfeed
//!
//! Text generation is an opaque capability behind [`TextGenerator`]; this
//! crate builds the prompts, calls the generator and caches the daily
//! market summary in the same single-slot way as the price feed.
//!
//! - [`generator`] - `TextGenerator` trait and the unconfigured fallback
//! - [`gemini`] - Google Gemini `generateContent` client
//! - [`prompts`] - Prompt construction
//! - [`summary`] - Market summary cache and its refresh job
//! - [`advice`] - Per-request portfolio insight and goal planning

pub mod advice;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod prompts;
pub mod summary;

pub use advice::{Advisor, PortfolioSnapshot, SavingsGoal};
pub use error::AdvisorError;
pub use gemini::{GeminiClient, GeminiSettings};
pub use generator::{TextGenerator, UnconfiguredGenerator};
pub use summary::{MarketSummary, MarketSummaryRefresher, SummaryStore};

/// Result type for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;
