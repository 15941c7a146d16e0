use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use facepair_core::CoreError;
use facepair_sheets::SheetsError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`SheetsError`] for remote
/// write failures. Implements [`IntoResponse`] to produce consistent JSON
/// error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `facepair_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The spreadsheet append or read failed.
    #[error(transparent)]
    Sheets(#[from] SheetsError),

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
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::NotFound { entity, name } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} not found: {name}"),
                ),
                // DataFormat is fatal at startup; a handler seeing it is a bug.
                CoreError::DataFormat(msg) => {
                    tracing::error!(error = %msg, "Pair table error reached a handler");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Sheet write failures: the user resubmits ---
            AppError::Sheets(err) => {
                tracing::error!(error = %err, "Spreadsheet request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "SHEET_WRITE_FAILED",
                    format!("Could not save the annotation: {err}. Please submit again."),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// The 404 for an unknown session id.
pub fn session_not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Session",
        name: id.to_string(),
    })
}
