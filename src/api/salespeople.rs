//! Salesperson API endpoints.

use axum::extract::{Path, State};
use chrono::Local;

use super::{rejected, success, ApiJson, ApiResult};
use crate::db::status_date_stamp;
use crate::errors::AppError;
use crate::models::{
    BaseTreatedToggled, CreateSalespersonRequest, DailyDisparosRequest, NewSalesperson,
    Salesperson, SalespersonWithDisparos, UpdateStatusRequest,
};
use crate::AppState;

/// GET /api/vendedores - List salespeople with their stored counters (zeros when absent).
pub async fn list_salespeople(
    State(state): State<AppState>,
) -> ApiResult<Vec<SalespersonWithDisparos>> {
    success(state.repo.list_salespeople_with_disparos().await?)
}

/// POST /api/vendedores - Create a salesperson.
pub async fn create_salesperson(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateSalespersonRequest>,
) -> ApiResult<Salesperson> {
    let (status, store_id) = request
        .validate()
        .map_err(|e| rejected("salesperson creation", e))?;

    if state.repo.get_store(store_id).await?.is_none() {
        return Err(rejected(
            "salesperson creation",
            AppError::Validation(format!("Store {} does not exist", store_id)),
        ));
    }

    let new = NewSalesperson {
        name: request.name.trim().to_string(),
        email: Some(request.email.trim().to_string()),
        store_id: Some(store_id),
        status,
        base_treated: true,
        daily_disparos: 0,
        last_status_type: Some(status.as_str().to_string()),
        last_status_date: Some(status_date_stamp(Local::now().date_naive())),
    };

    let salesperson = state.repo.create_salesperson(&new).await?;
    tracing::info!(salesperson_id = salesperson.id, store_id, "Salesperson created");
    success(salesperson)
}

/// DELETE /api/vendedores/{id} - Delete a salesperson and their weekly counters.
pub async fn delete_salesperson(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    state.repo.delete_salesperson(id).await?;
    tracing::info!(salesperson_id = id, "Salesperson deleted");
    success(())
}

/// PUT /api/vendedores/{id}/status - Change a salesperson's status.
pub async fn update_salesperson_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(request): ApiJson<UpdateStatusRequest>,
) -> ApiResult<Salesperson> {
    let status = request
        .validate()
        .map_err(|e| rejected("status change", e))?;

    success(state.repo.update_salesperson_status(id, status).await?)
}

/// POST /api/vendedores/{id}/base - Flip the base-treated flag.
pub async fn toggle_base_treated(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<BaseTreatedToggled> {
    let base_treated = state.repo.toggle_base_treated(id).await?;
    success(BaseTreatedToggled { id, base_treated })
}

/// PUT /api/vendedores/{id}/disparos-dia - Set today's outreach count.
pub async fn update_daily_disparos(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(request): ApiJson<DailyDisparosRequest>,
) -> ApiResult<Salesperson> {
    request
        .validate()
        .map_err(|e| rejected("daily count", e))?;

    state.repo.update_daily_disparos(id, request.value).await?;
    match state.repo.get_salesperson(id).await? {
        Some(salesperson) => success(salesperson),
        None => Err(AppError::NotFound(format!("Salesperson {} not found", id))),
    }
}
