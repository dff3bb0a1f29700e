use axum::{Json, Router, routing::get};
use serde::Serialize;

use super::AppState;
use crate::domain::error::DomainError;
use app_error::AppError;

pub(crate) mod app_error;
pub(crate) mod extract;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod response;
pub(crate) mod routes;


/// Every REST route plus the liveness probe, with state applied.
pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .merge(routes::router(state.clone()))
        .fallback(route_not_found)
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}

async fn route_not_found() -> AppError {
    AppError::Domain(DomainError::not_found("Route"))
}
