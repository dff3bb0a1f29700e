use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::http::handlers::categories::{
    create_category, get_category, list_categories,
};
use crate::presentation::http::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_categories))
        .route("/{id}", get(get_category));

    let protected = Router::new()
        .route("/", post(create_category))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(protected)
}
