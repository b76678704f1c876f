// Host Routes

use crate::api::{
    models::{ApiError, Envelope, RegisterRequest, StatusResponse},
    state::AppState,
};
use crate::registry::HostRecord;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

/// List every registered host
pub async fn list_hosts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<HostRecord>>>, ApiError> {
    let hosts = state.registry().list().await?;
    Ok(Json(Envelope::success(hosts)))
}

/// Register a host, probing it once before it is stored
pub async fn register_host(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<StatusResponse>>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    state
        .monitor
        .register(&request.hostname, request.notification_days)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(StatusResponse { status: true })),
    ))
}

/// Show one host
pub async fn show_host(
    State(state): State<Arc<AppState>>,
    Path(hostname): Path<String>,
) -> Result<Json<Envelope<HostRecord>>, ApiError> {
    let record = state.registry().get(&hostname).await?;
    Ok(Json(Envelope::success(record)))
}
