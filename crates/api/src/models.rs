//! Wire types
//!
//! Field names are camelCase on the wire; optional fields are omitted when
//! absent.

use advisor::{MarketSummary, PortfolioSnapshot, SavingsGoal};
use chrono::{DateTime, Utc};
use price_feed::{CacheEntry, PriceRow};
use serde::{Deserialize, Deserializer, Serialize};

/// Message shown before the first refresh completes
pub const NOT_READY_MESSAGE: &str = "Data is not available yet";

/// `GET /` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PriceRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&CacheEntry> for PriceResponse {
    fn from(entry: &CacheEntry) -> Self {
        let mut response = PriceResponse {
            status: entry.status(),
            source: None,
            fetched_at: None,
            data: entry.last_known_row().cloned(),
            message: None,
        };

        match entry {
            CacheEntry::Uninitialized => {
                response.message = Some(NOT_READY_MESSAGE.to_string());
            }
            CacheEntry::Success {
                source_url,
                fetched_at,
                ..
            } => {
                response.source = Some(source_url.clone());
                response.fetched_at = Some(*fetched_at);
            }
            CacheEntry::Error { message, .. } => {
                response.message = Some(message.clone());
            }
        }
        response
    }
}

/// `GET /api/ai/market-summary` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummaryResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&MarketSummary> for MarketSummaryResponse {
    fn from(entry: &MarketSummary) -> Self {
        let mut response = MarketSummaryResponse {
            status: entry.status(),
            summary: entry.last_known_summary().map(str::to_string),
            generated_at: None,
            message: None,
        };

        match entry {
            MarketSummary::Uninitialized => {
                response.message = Some(NOT_READY_MESSAGE.to_string());
            }
            MarketSummary::Success { generated_at, .. } => {
                response.generated_at = Some(*generated_at);
            }
            MarketSummary::Error { .. } => {
                response.message = Some("Market summary is temporarily unavailable".to_string());
            }
        }
        response
    }
}

/// `POST /api/ai/portfolio-insight` body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioInsightRequest {
    #[serde(deserialize_with = "lenient_number")]
    pub total_emas: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub avg_beli: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub total_profit: f64,
}

impl From<PortfolioInsightRequest> for PortfolioSnapshot {
    fn from(req: PortfolioInsightRequest) -> Self {
        PortfolioSnapshot {
            total_emas: req.total_emas,
            avg_beli: req.avg_beli,
            total_profit: req.total_profit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightResponse {
    pub insight: String,
}

/// `POST /api/ai/goal-planner` body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlanRequest {
    pub goal_name: String,
    #[serde(deserialize_with = "lenient_number")]
    pub goal_target: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub goal_years: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub current_value: f64,
}

impl From<GoalPlanRequest> for SavingsGoal {
    fn from(req: GoalPlanRequest) -> Self {
        SavingsGoal {
            name: req.goal_name,
            target: req.goal_target,
            years: req.goal_years,
            current_value: req.current_value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub plan: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Accept a JSON number or a numeric string (form inputs often send the
/// latter).
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got {:?}", s))),
    }
}
