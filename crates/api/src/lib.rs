//! HTTP API for Goldfeed
//!
//! Handlers only read the caches populated by the refresh worker, except the
//! two advice endpoints which prompt the generator per request.
//!
//! | Route | Method | Body |
//! |-------|--------|------|
//! | `/` | GET | cached gold price |
//! | `/api/ai/market-summary` | GET | cached daily market summary |
//! | `/api/ai/portfolio-insight` | POST | insight for a holding |
//! | `/api/ai/goal-planner` | POST | savings plan for a goal |
//! | `/health` | GET | liveness and feed status |

pub mod cors;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

pub use cors::cors_layer;
pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;

/// Result type for handlers
pub type Result<T> = std::result::Result<T, ApiError>;
