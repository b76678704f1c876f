// Health Check Route

use crate::api::{models::HealthResponse, state::AppState};
use axum::{Json, extract::State};
use std::sync::Arc;

/// Liveness probe
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        registry: state.registry().backend_name().to_string(),
    })
}
