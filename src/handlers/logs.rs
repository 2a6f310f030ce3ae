use axum::{Json, extract::State};
use std::sync::Arc;

use super::extract::ClientKey;
use crate::error::ApiError;
use crate::models::LogsResponse;
use crate::state::AppState;

// Whole history, no paging
pub async fn logs_handler(
    State(state): State<Arc<AppState>>,
    client: ClientKey,
) -> Result<Json<LogsResponse>, ApiError> {
    tracing::info!(
        "[LOGS] {} | IP: {} | Logs requested",
        chrono::Utc::now().to_rfc3339(),
        client
    );
    let logs = state.store.all().await?;
    Ok(Json(LogsResponse { logs }))
}
