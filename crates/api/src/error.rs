use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pasajes_core::error::CoreError;
use pasajes_core::fault::FaultCode;
use pasajes_db::StoreError;
use serde_json::json;

/// Message returned when the export function produced no file.
pub const EXPORT_MISSING_MESSAGE: &str = "El archivo no se generó en la ruta esperada.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for record store
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`]
/// to produce `{ "error": ..., "code": ... }` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `pasajes_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A record store failure (procedure rejection, database, export file).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Record store errors ---
            AppError::Store(store) => classify_store_error(store),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a record store error into an HTTP status, error code, and message.
///
/// - Recognised procedure faults keep the procedure's message and carry a
///   structured code: capacity → 422, schedule conflict → 409.
/// - Other procedure rejections are relayed verbatim with 400.
/// - A missing export file maps to 404.
/// - Everything else is a sanitized 500.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Procedure { fault, message } => {
            tracing::warn!(error = %message, ?fault, "Procedure rejected the call");
            match fault {
                Some(FaultCode::CapacityExceeded) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    FaultCode::CapacityExceeded.as_code(),
                    message.clone(),
                ),
                Some(FaultCode::ScheduleConflict) => (
                    StatusCode::CONFLICT,
                    FaultCode::ScheduleConflict.as_code(),
                    message.clone(),
                ),
                None => (StatusCode::BAD_REQUEST, "PROCEDURE_ERROR", message.clone()),
            }
        }
        StoreError::ExportMissing(path) => {
            tracing::error!(path = %path, "Export file was not produced");
            (
                StatusCode::NOT_FOUND,
                "EXPORT_NOT_FOUND",
                EXPORT_MISSING_MESSAGE.to_string(),
            )
        }
        StoreError::Database(db) => classify_sqlx_error(db),
        StoreError::Io(io) => {
            tracing::error!(error = %io, "Export file read failed");
            internal()
        }
    }
}

/// Classify a sqlx error that was not raised by a procedure.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (SQLSTATE 23505) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
