//! Event API endpoints.

use axum::extract::State;

use super::{rejected, success, ApiJson, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateEventRequest, Event};
use crate::AppState;

/// GET /api/eventos - List all events.
pub async fn list_events(State(state): State<AppState>) -> ApiResult<Vec<Event>> {
    success(state.repo.list_events().await?)
}

/// POST /api/eventos - Create an event.
pub async fn create_event(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateEventRequest>,
) -> ApiResult<Event> {
    request.validate().map_err(|e| rejected("event", e))?;

    if let Some(store_id) = request.store_id {
        if state.repo.get_store(store_id).await?.is_none() {
            return Err(rejected(
                "event",
                AppError::Validation(format!("Store {} does not exist", store_id)),
            ));
        }
    }

    success(state.repo.create_event(&request).await?)
}
