use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, post};

use crate::domain::user::Role;
use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::{create_post, delete_post, list_posts};
use crate::presentation::http::middleware::auth::jwt_auth_middleware;
use crate::presentation::http::middleware::role::require_role;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/", get(list_posts));

    let protected = Router::new()
        .route("/", post(create_post))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ));

    let admin = Router::new()
        .route("/{id}", delete(delete_post))
        .layer(middleware::from_fn_with_state(Role::Admin, require_role))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(protected).merge(admin)
}
