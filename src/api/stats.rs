//! Store statistics and service health.

use crate::api::auth::AuthSession;
use crate::api::error::ApiError;
use crate::api::AppState;
use crate::store::StoreStats;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub collections: usize,
    pub documents: u64,
}

/// GET /api/stats
pub async fn stats(
    State(state): State<Arc<AppState>>,
    _session: AuthSession,
) -> Result<Json<StoreStats>, ApiError> {
    Ok(Json(state.store.stats().await?))
}

/// GET /health — unauthenticated liveness probe.
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, ApiError> {
    let stats = state.store.stats().await?;
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        collections: stats.collections,
        documents: stats.documents,
    }))
}
