//! Weekly outreach counter endpoints.

use axum::extract::{Path, State};

use super::{rejected, success, ApiJson, ApiResult};
use crate::errors::AppError;
use crate::models::{WeekCounts, WeeklyDisparos};
use crate::AppState;

/// GET /api/vendedores/{id}/disparos - Stored weekly counters of a salesperson.
///
/// Answers 404 both for an unknown salesperson and for one with nothing recorded yet.
pub async fn get_weekly_disparos(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<WeeklyDisparos> {
    match state.repo.get_weekly_disparos(id).await? {
        Some(record) => success(record),
        None => Err(AppError::NotFound(format!(
            "No weekly counters recorded for salesperson {}",
            id
        ))),
    }
}

/// PUT /api/vendedores/{id}/disparos - Insert or replace the weekly counters.
pub async fn upsert_weekly_disparos(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(counts): ApiJson<WeekCounts>,
) -> ApiResult<WeeklyDisparos> {
    counts
        .validate()
        .map_err(|e| rejected("weekly counters", e))?;

    let record = state.repo.upsert_weekly_disparos(id, &counts).await?;
    tracing::info!(salesperson_id = id, total = counts.total(), "Weekly counters saved");
    success(record)
}
