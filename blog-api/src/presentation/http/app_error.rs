use crate::domain::error::DomainError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ErrorBody {
    pub(crate) success: bool,
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

impl AppError {
    fn parts(self) -> (StatusCode, String, Option<String>) {
        match self {
            AppError::Domain(err) => match err {
                DomainError::Validation { .. } => (
                    StatusCode::BAD_REQUEST,
                    "Validation failed".to_string(),
                    Some(err.to_string()),
                ),
                DomainError::AlreadyExists(_) => (
                    StatusCode::BAD_REQUEST,
                    "Validation failed".to_string(),
                    Some(err.to_string()),
                ),
                DomainError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string(), None)
                }
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string(), None),
                DomainError::Forbidden => forbidden(),
                DomainError::Unexpected(raw) => server_error(raw),
            },
            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(err.to_string()),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad request".to_string(), Some(msg)),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Not authorized to access this route".to_string(),
                None,
            ),
            AppError::Forbidden => forbidden(),
            AppError::Internal(err) => server_error(format!("{err:#}")),
        }
    }
}

fn forbidden() -> (StatusCode, String, Option<String>) {
    (
        StatusCode::FORBIDDEN,
        "Not allowed to perform this action".to_string(),
        None,
    )
}

// The raw cause is returned to the client as `error`.
fn server_error(raw: String) -> (StatusCode, String, Option<String>) {
    error!(error = %raw, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Server error".to_string(),
        Some(raw),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error) = self.parts();
        let body = ErrorBody {
            success: false,
            message,
            error,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::AppError;
    use crate::domain::error::DomainError;

    #[test]
    fn domain_errors_map_to_status_codes() {
        let cases = [
            (
                AppError::from(DomainError::Validation {
                    field: "title",
                    message: "must not be empty",
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(DomainError::AlreadyExists("email".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(DomainError::not_found("Blog")),
                StatusCode::NOT_FOUND,
            ),
            (AppError::from(DomainError::Forbidden), StatusCode::FORBIDDEN),
            (
                AppError::from(DomainError::InvalidCredentials),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::from(DomainError::Unexpected("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn not_found_message_names_the_resource() {
        let (_, message, error) = AppError::from(DomainError::not_found("Category")).parts();
        assert_eq!(message, "Category not found");
        assert!(error.is_none());
    }

    #[test]
    fn unexpected_error_carries_raw_cause() {
        let (status, message, error) =
            AppError::from(DomainError::Unexpected("pool timed out".to_string())).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Server error");
        assert_eq!(error.as_deref(), Some("pool timed out"));
    }
}
