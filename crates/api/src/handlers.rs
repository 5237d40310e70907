//! Route handlers

use advisor::{PortfolioSnapshot, SavingsGoal};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::models::{
    GoalPlanRequest, InsightResponse, MarketSummaryResponse, PlanResponse,
    PortfolioInsightRequest, PriceResponse,
};
use crate::state::AppState;
use crate::Result;

/// `GET /` - cached price, always 200
pub async fn get_price(State(state): State<AppState>) -> Json<PriceResponse> {
    let entry = state.prices.read();
    Json(PriceResponse::from(entry.as_ref()))
}

/// `GET /api/ai/market-summary` - cached summary, always 200
pub async fn get_market_summary(State(state): State<AppState>) -> Json<MarketSummaryResponse> {
    let entry = state.summaries.read();
    Json(MarketSummaryResponse::from(entry.as_ref()))
}

/// `POST /api/ai/portfolio-insight`
pub async fn portfolio_insight(
    State(state): State<AppState>,
    body: std::result::Result<Json<PortfolioInsightRequest>, JsonRejection>,
) -> Result<Json<InsightResponse>> {
    let Json(req) = body?;
    let snapshot = PortfolioSnapshot::from(req);
    let price = state.prices.read();

    let insight = state
        .advisor
        .portfolio_insight(&snapshot, price.last_known_row())
        .await
        .map_err(|e| ApiError::from_advisor(e, "Failed to generate portfolio insight"))?;

    Ok(Json(InsightResponse { insight }))
}

/// `POST /api/ai/goal-planner`
pub async fn goal_plan(
    State(state): State<AppState>,
    body: std::result::Result<Json<GoalPlanRequest>, JsonRejection>,
) -> Result<Json<PlanResponse>> {
    let Json(req) = body?;
    let goal = SavingsGoal::from(req);
    let price = state.prices.read();

    let plan = state
        .advisor
        .goal_plan(&goal, price.last_known_row())
        .await
        .map_err(|e| ApiError::from_advisor(e, "Failed to generate goal plan"))?;

    Ok(Json(PlanResponse { plan }))
}
