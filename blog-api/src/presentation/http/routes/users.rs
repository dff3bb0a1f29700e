use axum::Router;
use axum::middleware;
use axum::routing::put;

use crate::domain::user::Role;
use crate::presentation::AppState;
use crate::presentation::http::handlers::users::change_role;
use crate::presentation::http::middleware::auth::jwt_auth_middleware;
use crate::presentation::http::middleware::role::require_role;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/{id}/role", put(change_role))
        .layer(middleware::from_fn_with_state(Role::Admin, require_role))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
