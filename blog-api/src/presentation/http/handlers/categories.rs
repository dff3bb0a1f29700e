use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::category::{Category, CreateCategoryRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorBody};
use crate::presentation::http::extract::{AppJson, AppPath};
use crate::presentation::http::response::{DataResponse, ListResponse};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateCategoryDto {
    #[validate(length(min = 1, max = 64))]
    pub(crate) name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryDto {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Categories listed", body = ListResponse<CategoryDto>),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub(crate) async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ListResponse<CategoryDto>>> {
    let categories = state.category_service.list_categories().await?;
    Ok(Json(ListResponse::new(
        categories.into_iter().map(CategoryDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = DataResponse<CategoryDto>),
        (status = 404, description = "Category not found", body = ErrorBody)
    )
)]
pub(crate) async fn get_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<DataResponse<CategoryDto>>> {
    let category = state.category_service.get_category(id).await?;
    Ok(Json(DataResponse::new(category.into())))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = DataResponse<CategoryDto>),
        (status = 400, description = "Validation error or duplicate name", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub(crate) async fn create_category(
    State(state): State<AppState>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> AppResult<(StatusCode, Json<DataResponse<CategoryDto>>)> {
    dto.validate()?;
    let category = state
        .category_service
        .create_category(CreateCategoryRequest { name: dto.name })
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(category.into()))))
}
