use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("forbidden")]
    Forbidden,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}

impl DomainError {
    pub(crate) fn not_found(resource: &str) -> Self {
        DomainError::NotFound(resource.to_string())
    }
}
