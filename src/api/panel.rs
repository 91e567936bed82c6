//! Panel endpoint.

use axum::extract::State;

use super::{success, ApiResult};
use crate::dashboard::{load_panel, PanelSummary};
use crate::AppState;

/// GET /api/painel - Aggregated KPIs over every salesperson.
pub async fn get_panel(State(state): State<AppState>) -> ApiResult<PanelSummary> {
    success(load_panel(&state.repo).await?)
}
