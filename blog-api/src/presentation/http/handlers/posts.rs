use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::post::{CreatePostRequest, PopulatedPost, Post};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorBody};
use crate::presentation::http::extract::AppPath;
use crate::presentation::http::handlers::blogs::AuthorDto;
use crate::presentation::http::middleware::auth::AuthenticatedUser;

/// Documented shape of a post body. The body is read leniently: any other
/// field, `author` included, is ignored, scalars are stored as text and a
/// missing or unparsable body yields an empty post.
#[derive(Debug, ToSchema)]
pub(crate) struct CreatePostDto {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
}

impl CreatePostDto {
    pub(crate) fn from_body(body: &[u8]) -> Self {
        let fields: Map<String, Value> = serde_json::from_slice(body).unwrap_or_default();
        Self {
            title: scalar_text(fields.get("title")),
            content: scalar_text(fields.get("content")),
        }
    }
}

// Arrays and objects have no text form and are dropped.
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) author: Option<AuthorDto>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// A freshly stored post; `author` is the caller's id, not populated.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatedPostDto {
    pub(crate) id: i64,
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) author: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDeletedDto {
    pub(crate) message: String,
}

impl From<PopulatedPost> for PostDto {
    fn from(populated: PopulatedPost) -> Self {
        let post = populated.post;
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author: populated.author.map(AuthorDto::from),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<Post> for CreatedPostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author: post.author_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts in insertion order", body = [PostDto]),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub(crate) async fn list_posts(State(state): State<AppState>) -> AppResult<Json<Vec<PostDto>>> {
    let posts = state.post_service.list_posts().await?;
    Ok(Json(posts.into_iter().map(PostDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = CreatedPostDto),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    body: Bytes,
) -> AppResult<(StatusCode, Json<CreatedPostDto>)> {
    let dto = CreatePostDto::from_body(&body);
    let req = CreatePostRequest {
        title: dto.title,
        content: dto.content,
    };

    let post = state.post_service.create_post(auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Delete acknowledged, even for unknown ids", body = PostDeletedDto),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<PostDeletedDto>> {
    state.post_service.delete_post(id).await?;
    Ok(Json(PostDeletedDto {
        message: "Post deleted".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::CreatePostDto;

    #[test]
    fn body_scalars_are_kept_as_text() {
        let dto = CreatePostDto::from_body(br#"{"title": 5, "content": true, "author": 9}"#);
        assert_eq!(dto.title.as_deref(), Some("5"));
        assert_eq!(dto.content.as_deref(), Some("true"));
    }

    #[test]
    fn structured_values_are_dropped() {
        let dto = CreatePostDto::from_body(br#"{"title": ["x"], "content": {"a": 1}}"#);
        assert!(dto.title.is_none());
        assert!(dto.content.is_none());
    }

    #[test]
    fn empty_or_non_object_body_gives_an_empty_post() {
        for body in [&b""[..], b"not json", b"[1, 2]", b"null"] {
            let dto = CreatePostDto::from_body(body);
            assert!(dto.title.is_none());
            assert!(dto.content.is_none());
        }
    }
}
