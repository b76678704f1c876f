// Recheck Route

use crate::api::{
    models::{ApiError, Envelope},
    state::AppState,
};
use crate::monitor::RecheckTarget;
use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

/// Recheck one host, or every host when the path segment is `all`
pub async fn check_deadline(
    State(state): State<Arc<AppState>>,
    Path(target): Path<String>,
) -> Result<Json<Envelope<&'static str>>, ApiError> {
    let target: RecheckTarget = target.parse()?;
    let report = state.monitor.recheck(&target).await?;

    tracing::info!(
        "Recheck of {} done: {} checked, {} notified",
        target,
        report.checked.len(),
        report.notified
    );

    Ok(Json(Envelope::success("ok")))
}
