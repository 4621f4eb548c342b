//! API Handlers
//!
//! HTTP request handlers for each pool cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::Result;
use crate::models::{
    AttemptStatsResponse, ClearResponse, HealthResponse, PoolRequest, PoolResponse,
};
use crate::service::{CacheStatsView, PoolService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The engine instance, constructed at bootstrap
    pub service: Arc<PoolService>,
}

impl AppState {
    /// Creates a new AppState around a service instance.
    pub fn new(service: PoolService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Handler for POST /pool
///
/// Fetches a cached pool or generates a fresh one, consuming one attempt
/// when user context is supplied.
pub async fn pool_handler(
    State(state): State<AppState>,
    Json(req): Json<PoolRequest>,
) -> Result<Json<PoolResponse>> {
    let (config, attempt) = req.into_parts()?;
    let grant = state
        .service
        .get_question_pool(&config, attempt.as_ref())
        .await?;

    Ok(Json(PoolResponse::new(grant)))
}

/// Handler for GET /attempts/:user_id/:exam_id
///
/// Returns the attempt view for one (user, exam) pair; unknown pairs get a
/// zeroed view, not an error.
pub async fn attempt_stats_handler(
    State(state): State<AppState>,
    Path((user_id, exam_id)): Path<(String, String)>,
) -> Json<AttemptStatsResponse> {
    let stats = state.service.user_attempt_stats(&user_id, &exam_id).await;

    Json(AttemptStatsResponse::new(user_id, exam_id, stats))
}

/// Handler for GET /stats
///
/// Returns aggregate cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStatsView> {
    Json(state.service.cache_stats().await)
}

/// Handler for DELETE /cache
///
/// Drops every cached pool.
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let removed = state.service.clear_cache().await;

    Json(ClearResponse::all(removed))
}

/// Handler for DELETE /cache/category/:category
///
/// Drops every pool whose key includes the category.
pub async fn clear_category_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<ClearResponse> {
    let removed = state.service.clear_cache_by_category(&category).await;

    Json(ClearResponse::category(&category, removed))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
