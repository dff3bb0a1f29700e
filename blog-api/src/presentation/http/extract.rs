use axum::extract::{FromRequest, FromRequestParts};

use super::app_error::AppError;

/// `Json` whose rejection renders through `AppError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub(crate) struct AppJson<T>(pub(crate) T);

/// `Path` whose rejection renders through `AppError`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub(crate) struct AppPath<T>(pub(crate) T);
