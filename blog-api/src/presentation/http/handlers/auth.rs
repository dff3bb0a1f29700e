use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::{ChangePasswordRequest, LoginRequest, RegisterRequest, Role, User};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult, ErrorBody};
use crate::presentation::http::extract::AppJson;
use crate::presentation::http::middleware::auth::AuthenticatedUser;
use crate::presentation::http::response::{DataResponse, MessageResponse};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct RegisterDto {
    #[validate(length(min = 3, max = 64))]
    pub(crate) username: String,
    #[validate(length(min = 1, max = 255))]
    pub(crate) email: String,
    #[validate(length(min = 6, max = 128))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LoginDto {
    #[validate(length(min = 1, max = 64))]
    pub(crate) username: String,
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChangePasswordDto {
    #[validate(length(min = 1))]
    pub(crate) current_password: String,
    #[validate(length(min = 6, max = 128))]
    pub(crate) new_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthResponseDto {
    pub(crate) success: bool,
    pub(crate) token: String,
    pub(crate) data: UserDto,
}

/// Public view of a user. The password hash never leaves the data layer.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) role: Role,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Registered successfully", body = AuthResponseDto),
        (status = 400, description = "Validation error or duplicate user", body = ErrorBody),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    AppJson(dto): AppJson<RegisterDto>,
) -> AppResult<(StatusCode, Json<AuthResponseDto>)> {
    dto.validate()?;

    let req = RegisterRequest {
        username: dto.username,
        email: dto.email,
        password: dto.password,
    };

    let result = state.auth_service.register(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponseDto {
            success: true,
            token: result.access_token,
            data: result.user.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = AuthResponseDto),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    AppJson(dto): AppJson<LoginDto>,
) -> AppResult<(StatusCode, Json<AuthResponseDto>)> {
    dto.validate()?;

    let req = LoginRequest {
        username: dto.username,
        password: dto.password,
    };

    let result = state.auth_service.login(req).await?;

    Ok((
        StatusCode::OK,
        Json(AuthResponseDto {
            success: true,
            token: result.access_token,
            data: result.user.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current user", body = DataResponse<UserDto>),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub(crate) async fn me(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<Json<DataResponse<UserDto>>> {
    let user = state
        .auth_service
        .resolve_caller(auth.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(DataResponse::new(user.into())))
}

#[utoipa::path(
    put,
    path = "/api/auth/password",
    tag = "auth",
    security(
        ("bearer_auth" = [])
    ),
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized or wrong current password", body = ErrorBody)
    )
)]
pub(crate) async fn change_password(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppJson(dto): AppJson<ChangePasswordDto>,
) -> AppResult<Json<MessageResponse>> {
    dto.validate()?;

    let req = ChangePasswordRequest {
        current_password: dto.current_password,
        new_password: dto.new_password,
    };
    state.auth_service.change_password(auth.user_id, req).await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}
