use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mantis_core::error::CoreError;

use crate::response::Message;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] with the service's status-code policy:
/// an unknown project maps to 404, every other business, validation, or
/// upstream failure is embedded as a `message` in an HTTP 200 body so
/// callers always get a well-formed JSON envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mantis_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An aggregate-database error from sqlx.
    #[error("Error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(CoreError::ProjectNotFound { name }) => (
                StatusCode::NOT_FOUND,
                format!("{name} project not found. Is {name} the correct project?"),
            ),
            AppError::Core(core) => (StatusCode::OK, core.to_string()),
            AppError::Database(err) => {
                tracing::error!(error = %err, "Aggregate query failed");
                (StatusCode::OK, self.to_string())
            }
        };

        (status, Json(Message { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_not_found_maps_to_404() {
        let err = AppError::Core(CoreError::ProjectNotFound {
            name: "does-not-exist".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_errors_stay_http_200() {
        let invalid = AppError::Core(CoreError::InvalidFilterType {
            given: "StartsWith".into(),
        });
        assert_eq!(invalid.into_response().status(), StatusCode::OK);

        let validation = AppError::Core(CoreError::Validation("No media name provided".into()));
        assert_eq!(validation.into_response().status(), StatusCode::OK);

        let upstream = AppError::Core(CoreError::Upstream("connection refused".into()));
        assert_eq!(upstream.into_response().status(), StatusCode::OK);
    }
}
