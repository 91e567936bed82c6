//! REST API module.
//!
//! Thin handlers over the repository, the panel aggregator and the report pipeline.

mod disparos;
mod events;
mod panel;
mod reports;
mod salespeople;
mod stores;

pub use disparos::*;
pub use events::*;
pub use panel::*;
pub use reports::*;
pub use salespeople::*;
pub use stores::*;

use axum::{
    extract::FromRequest,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// JSON request body whose rejections use the error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Log a rejected request body and pass the validation error through.
fn rejected(context: &str, err: AppError) -> AppError {
    tracing::warn!("Rejected {}: {}", context, err);
    err
}
