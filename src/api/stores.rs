//! Store API endpoints.

use axum::extract::{Path, State};

use super::{rejected, success, ApiJson, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateStoreRequest, Store, StoreWithSalespeople, UpdateStoreRequest};
use crate::AppState;

/// GET /api/lojas - List all stores with their salespeople.
pub async fn list_stores(State(state): State<AppState>) -> ApiResult<Vec<StoreWithSalespeople>> {
    let stores = state.repo.list_stores().await?;

    let mut result = Vec::with_capacity(stores.len());
    for store in stores {
        let salespeople = state.repo.list_salespeople_by_store(store.id).await?;
        result.push(StoreWithSalespeople { store, salespeople });
    }

    success(result)
}

/// GET /api/lojas/{id} - Get a single store with its salespeople.
pub async fn get_store(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StoreWithSalespeople> {
    match state.repo.get_store(id).await? {
        Some(store) => {
            let salespeople = state.repo.list_salespeople_by_store(store.id).await?;
            success(StoreWithSalespeople { store, salespeople })
        }
        None => Err(AppError::NotFound(format!("Store {} not found", id))),
    }
}

/// POST /api/lojas - Create a store together with its initial manager.
pub async fn create_store(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateStoreRequest>,
) -> ApiResult<StoreWithSalespeople> {
    request
        .validate()
        .map_err(|e| rejected("store creation", e))?;

    let (store, manager) = state
        .repo
        .create_store_with_manager(
            request.name.trim(),
            request.responsible.trim(),
            request.manager_name.trim(),
            request.manager_email.trim(),
        )
        .await?;

    tracing::info!(store_id = store.id, manager_id = manager.id, "Store created");
    success(StoreWithSalespeople {
        store,
        salespeople: vec![manager],
    })
}

/// PUT /api/lojas/{id} - Edit a store's name and responsible party.
pub async fn update_store(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(request): ApiJson<UpdateStoreRequest>,
) -> ApiResult<Store> {
    request.validate().map_err(|e| rejected("store update", e))?;

    let store = state
        .repo
        .update_store(id, request.name.trim(), request.responsible.trim())
        .await?;
    success(store)
}
