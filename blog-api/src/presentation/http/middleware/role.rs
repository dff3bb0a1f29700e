use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use super::auth::AuthenticatedUser;
use crate::domain::user::Role;
use crate::presentation::http::app_error::AppError;

/// Authorization gate: the caller's role must equal `required`. Runs after
/// [`super::auth::jwt_auth_middleware`].
pub(crate) async fn require_role(
    State(required): State<Role>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let caller = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or(AppError::Unauthorized)?;

    if caller.role != required {
        debug!(
            user_id = caller.user_id,
            username = %caller.username,
            role = %caller.role,
            required = %required,
            "role rejected"
        );
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}
