use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use musicstore_core::error::CoreError;
use musicstore_db::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for storage
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `musicstore_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage error from `musicstore_db`.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Store(StoreError::Core(core)) => classify_core_error(core),
            AppError::Store(StoreError::Database(err)) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    err.to_string(),
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

/// Classify a domain error into an HTTP status, error code, and message.
///
/// - `NotFound` and `EmptyCollection` map to 404.
/// - `DuplicateId` and `DependencyBlocked` map to 400.
/// - `Internal` maps to 500 and surfaces its raw error text.
fn classify_core_error(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::DuplicateId { entity, id } => (
            StatusCode::BAD_REQUEST,
            "DUPLICATE_ID",
            format!("{entity} with id {id} already exists"),
        ),
        CoreError::DependencyBlocked { reason } => (
            StatusCode::BAD_REQUEST,
            "DEPENDENCY_BLOCKED",
            reason.clone(),
        ),
        CoreError::EmptyCollection { entity } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("No {entity} records exist"),
        ),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal error");
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
        }
    }
}
