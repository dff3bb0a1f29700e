use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::blog::{CategorySummary, CreateBlogRequest, PopulatedBlog, UpdateBlogRequest};
use crate::domain::user::AuthorSummary;
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorBody};
use crate::presentation::http::extract::{AppJson, AppPath};
use crate::presentation::http::middleware::auth::AuthenticatedUser;
use crate::presentation::http::response::{DataResponse, ListResponse, MessageResponse};

/// Any `author` in the body is ignored; the caller becomes the author.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateBlogDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) content: String,
    #[validate(range(min = 1))]
    pub(crate) category: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateBlogDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: Option<String>,
    #[validate(length(min = 1))]
    pub(crate) content: Option<String>,
    #[validate(range(min = 1))]
    pub(crate) category: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthorDto {
    pub(crate) id: i64,
    pub(crate) username: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategoryRefDto {
    pub(crate) id: i64,
    pub(crate) name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BlogDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category: Option<CategoryRefDto>,
    pub(crate) author: Option<AuthorDto>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl From<AuthorSummary> for AuthorDto {
    fn from(author: AuthorSummary) -> Self {
        Self {
            id: author.id,
            username: author.username,
        }
    }
}

impl From<CategorySummary> for CategoryRefDto {
    fn from(category: CategorySummary) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

impl From<PopulatedBlog> for BlogDto {
    fn from(populated: PopulatedBlog) -> Self {
        let blog = populated.blog;
        Self {
            id: blog.id,
            title: blog.title,
            content: blog.content,
            category: populated.category.map(CategoryRefDto::from),
            author: populated.author.map(AuthorDto::from),
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

fn to_list(blogs: Vec<PopulatedBlog>) -> ListResponse<BlogDto> {
    ListResponse::new(blogs.into_iter().map(BlogDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/blogs",
    tag = "blogs",
    responses(
        (status = 200, description = "Blogs listed", body = ListResponse<BlogDto>),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub(crate) async fn list_blogs(
    State(state): State<AppState>,
) -> AppResult<Json<ListResponse<BlogDto>>> {
    let blogs = state.blog_service.list_blogs().await?;
    Ok(Json(to_list(blogs)))
}

#[utoipa::path(
    get,
    path = "/api/blogs/{id}",
    tag = "blogs",
    params(
        ("id" = i64, Path, description = "Blog id")
    ),
    responses(
        (status = 200, description = "Blog found", body = DataResponse<BlogDto>),
        (status = 404, description = "Blog not found", body = ErrorBody),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub(crate) async fn get_blog(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<DataResponse<BlogDto>>> {
    let blog = state.blog_service.get_blog(id).await?;
    Ok(Json(DataResponse::new(blog.into())))
}

#[utoipa::path(
    post,
    path = "/api/blogs",
    tag = "blogs",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreateBlogDto,
    responses(
        (status = 201, description = "Blog created", body = DataResponse<BlogDto>),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Author role required", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub(crate) async fn create_blog(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppJson(dto): AppJson<CreateBlogDto>,
) -> AppResult<(StatusCode, Json<DataResponse<BlogDto>>)> {
    dto.validate()?;
    let req = CreateBlogRequest {
        title: dto.title,
        content: dto.content,
        category_id: dto.category,
    };

    let blog = state.blog_service.create_blog(auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(blog.into()))))
}

#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    tag = "blogs",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Blog id")
    ),
    request_body = UpdateBlogDto,
    responses(
        (status = 200, description = "Blog updated", body = DataResponse<BlogDto>),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Not the author or an admin", body = ErrorBody),
        (status = 404, description = "Blog or category not found", body = ErrorBody),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub(crate) async fn update_blog(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateBlogDto>,
) -> AppResult<Json<DataResponse<BlogDto>>> {
    dto.validate()?;
    let req = UpdateBlogRequest {
        title: dto.title,
        content: dto.content,
        category_id: dto.category,
    };

    let blog = state
        .blog_service
        .update_blog(auth.actor(), id, req)
        .await?;
    Ok(Json(DataResponse::new(blog.into())))
}

#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    tag = "blogs",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Blog id")
    ),
    responses(
        (status = 200, description = "Blog deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Not the author or an admin", body = ErrorBody),
        (status = 404, description = "Blog not found", body = ErrorBody),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub(crate) async fn delete_blog(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.blog_service.delete_blog(auth.actor(), id).await?;
    Ok(Json(MessageResponse::new("Blog deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/api/blogs/category/{category_id}",
    tag = "blogs",
    params(
        ("category_id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Blogs in category", body = ListResponse<BlogDto>),
        (status = 404, description = "Category not found", body = ErrorBody),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub(crate) async fn list_blogs_by_category(
    State(state): State<AppState>,
    AppPath(category_id): AppPath<i64>,
) -> AppResult<Json<ListResponse<BlogDto>>> {
    let blogs = state.blog_service.list_by_category(category_id).await?;
    Ok(Json(to_list(blogs)))
}
