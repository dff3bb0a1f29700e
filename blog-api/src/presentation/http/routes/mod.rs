use axum::Router;

use crate::presentation::AppState;

pub(crate) mod auth;
pub(crate) mod blogs;
pub(crate) mod categories;
pub(crate) mod posts;
pub(crate) mod users;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth::router(state.clone()))
        .nest("/api/users", users::router(state.clone()))
        .nest("/api/categories", categories::router(state.clone()))
        .nest("/api/blogs", blogs::router(state.clone()))
        .nest("/api/posts", posts::router(state))
}
