use axum::{Json, extract::State};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::user::Role;
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorBody};
use crate::presentation::http::extract::{AppJson, AppPath};
use crate::presentation::http::handlers::auth::UserDto;
use crate::presentation::http::response::DataResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ChangeRoleDto {
    pub(crate) role: Role,
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/role",
    tag = "users",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "User id")
    ),
    request_body = ChangeRoleDto,
    responses(
        (status = 200, description = "Role changed", body = DataResponse<UserDto>),
        (status = 400, description = "Unknown role", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
pub(crate) async fn change_role(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<ChangeRoleDto>,
) -> AppResult<Json<DataResponse<UserDto>>> {
    let user = state.auth_service.change_role(id, dto.role).await?;
    Ok(Json(DataResponse::new(user.into())))
}
