//! Report download endpoint.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use super::{rejected, ApiJson};
use crate::errors::AppError;
use crate::models::GenerateReportRequest;
use crate::report::{generate_report, PDF_MIME};
use crate::AppState;

/// POST /api/relatorios - Render, archive and return a store report as a PDF attachment.
pub async fn create_report(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateReportRequest>,
) -> Result<Response, AppError> {
    let store_id = request.validate().map_err(|e| rejected("report", e))?;

    let report = generate_report(
        &state.repo,
        &state.styles,
        &state.config.reports_dir,
        store_id,
        request.note.as_deref(),
    )
    .await?;

    let disposition = format!("attachment; filename=\"{}\"", report.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, PDF_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}
