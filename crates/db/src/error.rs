use pasajes_core::fault::{classify_message, FaultCode};

/// Failure of a record store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The stored function rejected the call. `fault` is set for the
    /// recognised business-rule faults; `message` is the function's text.
    #[error("{message}")]
    Procedure {
        fault: Option<FaultCode>,
        message: String,
    },

    /// Any other database failure (connection, decoding, missing function).
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// The export function ran but produced no file.
    #[error("Export file not found: {0}")]
    ExportMissing(String),

    #[error("Export file could not be read: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn procedure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Procedure {
            fault: classify_message(&message),
            message,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let code = db_err.code();
            let fault = code
                .as_deref()
                .and_then(FaultCode::from_sqlstate)
                .or_else(|| classify_message(db_err.message()));
            if fault.is_some() || is_raised_by_procedure(code.as_deref()) {
                return Self::Procedure {
                    fault,
                    message: db_err.message().to_string(),
                };
            }
        }
        Self::Database(err)
    }
}

/// SQLSTATEs raised explicitly from PL/pgSQL: class `P0` (`RAISE EXCEPTION`
/// without a code) and the application class `PT`.
pub fn is_raised_by_procedure(sqlstate: Option<&str>) -> bool {
    sqlstate.is_some_and(|s| s.starts_with("P0") || s.starts_with("PT"))
}
