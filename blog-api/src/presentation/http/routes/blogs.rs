use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};

use crate::domain::user::Role;
use crate::presentation::AppState;
use crate::presentation::http::handlers::blogs::{
    create_blog, delete_blog, get_blog, list_blogs, list_blogs_by_category, update_blog,
};
use crate::presentation::http::middleware::auth::jwt_auth_middleware;
use crate::presentation::http::middleware::role::require_role;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_blogs))
        .route("/{id}", get(get_blog))
        .route("/category/{category_id}", get(list_blogs_by_category));

    // Layers run bottom-up: authentication first, then the role check.
    let authoring = Router::new()
        .route("/", post(create_blog))
        .layer(middleware::from_fn_with_state(Role::Author, require_role))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ));

    // Ownership is decided by the service once the blog is loaded.
    let owned = Router::new()
        .route("/{id}", put(update_blog).delete(delete_blog))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(authoring).merge(owned)
}
