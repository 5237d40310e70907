//! Router assembly

use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use server::{health_routes, HealthState};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::cors::cors_layer;
use crate::handlers;
use crate::middleware::track_metrics;
use crate::state::AppState;

/// Build the full application router, health check included
pub fn build_router(state: AppState, health: Arc<HealthState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(handlers::get_price))
        .route("/api/ai/market-summary", get(handlers::get_market_summary))
        .route("/api/ai/portfolio-insight", post(handlers::portfolio_insight))
        .route("/api/ai/goal-planner", post(handlers::goal_plan))
        .with_state(state)
        .merge(health_routes(health))
        .layer(from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor::{
        Advisor, AdvisorError, MarketSummary, SummaryStore, TextGenerator, UnconfiguredGenerator,
    };
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use price_feed::{CacheEntry, CacheStore, PriceRow};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Echoes the prompt back so tests can see what was sent
    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate_text(&self, prompt: &str) -> advisor::Result<String> {
            Ok(prompt.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate_text(&self, _prompt: &str) -> advisor::Result<String> {
            Err(AdvisorError::Upstream("HTTP 429 quota exhausted".into()))
        }
    }

    struct Fixture {
        prices: Arc<CacheStore>,
        summaries: Arc<SummaryStore>,
        router: Router,
    }

    fn fixture_with(generator: Arc<dyn TextGenerator>, origins: &[String]) -> Fixture {
        let prices = Arc::new(CacheStore::default());
        let summaries = Arc::new(SummaryStore::default());
        let state = AppState::new(prices.clone(), summaries.clone(), Advisor::new(generator));
        let probe_prices = prices.clone();
        let health = HealthState::new("goldfeed")
            .with_feed_probe(move || probe_prices.read().status().to_string());

        Fixture {
            prices,
            summaries,
            router: build_router(state, Arc::new(health), origins),
        }
    }

    fn fixture(generator: Arc<dyn TextGenerator>) -> Fixture {
        fixture_with(generator, &[])
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn one_gram() -> PriceRow {
        PriceRow::new("1gram", "1000000", "950000")
    }

    #[tokio::test]
    async fn test_price_uninitialized() {
        let fx = fixture(Arc::new(EchoGenerator));

        let response = fx.router.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "uninitialized");
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn test_price_success() {
        let fx = fixture(Arc::new(EchoGenerator));
        fx.prices
            .write(CacheEntry::success("https://anekalogam.co.id/id", one_gram()));

        let response = fx.router.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["source"], "https://anekalogam.co.id/id");
        assert_eq!(json["data"]["hargaJual"], "1000000");
        assert_eq!(json["data"]["hargaBeli"], "950000");
    }

    #[tokio::test]
    async fn test_price_error_is_still_ok_status() {
        let fx = fixture(Arc::new(EchoGenerator));
        let previous = CacheEntry::success("https://anekalogam.co.id/id", one_gram());
        fx.prices
            .write(CacheEntry::failure("Request timed out", &previous));

        let response = fx.router.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Request timed out");
        assert_eq!(json["data"]["gramasi"], "1gram");
    }

    #[tokio::test]
    async fn test_market_summary_states() {
        let fx = fixture(Arc::new(EchoGenerator));

        let response = fx.router.clone().oneshot(get("/api/ai/market-summary")).await.unwrap();
        assert_eq!(body_json(response).await["status"], "uninitialized");

        fx.summaries
            .write(MarketSummary::success("Harga emas stabil.", Some(one_gram())));
        let response = fx.router.clone().oneshot(get("/api/ai/market-summary")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["summary"], "Harga emas stabil.");
        assert!(json["generatedAt"].is_string());

        let failed = MarketSummary::failure("HTTP 500", &fx.summaries.read());
        fx.summaries.write(failed);
        let response = fx.router.oneshot(get("/api/ai/market-summary")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["summary"], "Harga emas stabil.");
        assert!(!json["message"].as_str().unwrap().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_portfolio_insight_success() {
        let fx = fixture(Arc::new(EchoGenerator));
        fx.prices
            .write(CacheEntry::success("https://anekalogam.co.id/id", one_gram()));

        let request = post_json(
            "/api/ai/portfolio-insight",
            json!({"totalEmas": 5, "avgBeli": 900000, "totalProfit": 250000}),
        );
        let response = fx.router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let insight = body_json(response).await["insight"].as_str().unwrap().to_string();
        assert!(insight.contains("Rp 900.000"));
        assert!(insight.contains("Rp 950.000"));
    }

    #[tokio::test]
    async fn test_goal_planner_success() {
        let fx = fixture(Arc::new(EchoGenerator));

        let request = post_json(
            "/api/ai/goal-planner",
            json!({"goalName": "Naik Haji", "goalTarget": 80000000, "goalYears": 5, "currentValue": 10000000}),
        );
        let response = fx.router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let plan = body_json(response).await["plan"].as_str().unwrap().to_string();
        assert!(plan.contains("Naik Haji"));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_generic_500() {
        let fx = fixture(Arc::new(FailingGenerator));

        let request = post_json(
            "/api/ai/portfolio-insight",
            json!({"totalEmas": 1, "avgBeli": 1, "totalProfit": 0}),
        );
        let response = fx.router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Failed to generate portfolio insight");
    }

    #[tokio::test]
    async fn test_unconfigured_generator_is_500() {
        let fx = fixture(Arc::new(UnconfiguredGenerator));

        let request = post_json(
            "/api/ai/goal-planner",
            json!({"goalName": "Rumah", "goalTarget": 1, "goalYears": 1, "currentValue": 0}),
        );
        let response = fx.router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_input_is_400() {
        let fx = fixture(Arc::new(EchoGenerator));

        let request = post_json(
            "/api/ai/goal-planner",
            json!({"goalName": "Rumah", "goalTarget": 1000, "goalYears": 0}),
        );
        let response = fx.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());

        let request = post_json(
            "/api/ai/portfolio-insight",
            json!({"totalEmas": 1, "avgBeli": 1e30, "totalProfit": 0}),
        );
        let response = fx.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let request = Request::post("/api/ai/portfolio-insight")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = fx.router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_health_includes_feed_status() {
        let fx = fixture(Arc::new(EchoGenerator));
        fx.prices.write(CacheEntry::success("https://x.test", one_gram()));

        let response = fx.router.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["feed_status"], "success");
    }

    #[tokio::test]
    async fn test_cors_permissive_by_default() {
        let fx = fixture(Arc::new(EchoGenerator));

        let request = Request::get("/")
            .header(header::ORIGIN, "https://app.example")
            .body(Body::empty())
            .unwrap();
        let response = fx.router.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_restricted_origins() {
        let fx = fixture_with(
            Arc::new(EchoGenerator),
            &["https://app.example".to_string()],
        );

        let allowed = Request::get("/")
            .header(header::ORIGIN, "https://app.example")
            .body(Body::empty())
            .unwrap();
        let response = fx.router.clone().oneshot(allowed).await.unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://app.example"
        );

        let denied = Request::get("/")
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::empty())
            .unwrap();
        let response = fx.router.oneshot(denied).await.unwrap();
        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let fx = fixture(Arc::new(EchoGenerator));
        let response = fx.router.oneshot(get("/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
