//! CSV report download.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/exportar
///
/// Runs the export function and streams back the file it wrote as an
/// attachment.
pub async fn export_csv(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let file = state.store.export_csv().await?;
    tracing::info!(file_name = %file.file_name, bytes = file.bytes.len(), "Report exported");

    let disposition = format!("attachment; filename=\"{}\"", file.file_name);
    let disposition = header::HeaderValue::from_str(&disposition)
        .map_err(|e| AppError::InternalError(format!("Invalid export file name: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, header::HeaderValue::from_static("text/csv")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    ))
}
