//! API Routes
//!
//! Configures the Axum router with all pool cache endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    attempt_stats_handler, clear_cache_handler, clear_category_handler, health_handler,
    pool_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /pool` - Fetch or generate a question pool
/// - `GET /attempts/:user_id/:exam_id` - Attempt stats for one user/exam pair
/// - `GET /stats` - Cache statistics
/// - `DELETE /cache` - Clear all cached pools
/// - `DELETE /cache/category/:category` - Clear pools touching one category
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/pool", post(pool_handler))
        .route("/attempts/:user_id/:exam_id", get(attempt_stats_handler))
        .route("/stats", get(stats_handler))
        .route("/cache", delete(clear_cache_handler))
        .route("/cache/category/:category", delete(clear_category_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
