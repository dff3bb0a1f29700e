use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::user::Role;
use crate::presentation::http::app_error::ErrorBody;
use crate::presentation::http::handlers::auth::{
    AuthResponseDto, ChangePasswordDto, LoginDto, RegisterDto, UserDto,
};
use crate::presentation::http::handlers::blogs::{
    AuthorDto, BlogDto, CategoryRefDto, CreateBlogDto, UpdateBlogDto,
};
use crate::presentation::http::handlers::categories::{CategoryDto, CreateCategoryDto};
use crate::presentation::http::handlers::posts::{
    CreatePostDto, CreatedPostDto, PostDeletedDto, PostDto,
};
use crate::presentation::http::handlers::users::ChangeRoleDto;
use crate::presentation::http::response::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::auth::register,
        crate::presentation::http::handlers::auth::login,
        crate::presentation::http::handlers::auth::me,
        crate::presentation::http::handlers::auth::change_password,
        crate::presentation::http::handlers::users::change_role,
        crate::presentation::http::handlers::categories::list_categories,
        crate::presentation::http::handlers::categories::get_category,
        crate::presentation::http::handlers::categories::create_category,
        crate::presentation::http::handlers::blogs::list_blogs,
        crate::presentation::http::handlers::blogs::get_blog,
        crate::presentation::http::handlers::blogs::create_blog,
        crate::presentation::http::handlers::blogs::update_blog,
        crate::presentation::http::handlers::blogs::delete_blog,
        crate::presentation::http::handlers::blogs::list_blogs_by_category,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::delete_post
    ),
    components(
        schemas(
            Role,
            ErrorBody,
            MessageResponse,
            RegisterDto,
            LoginDto,
            ChangePasswordDto,
            AuthResponseDto,
            UserDto,
            ChangeRoleDto,
            CreateCategoryDto,
            CategoryDto,
            CreateBlogDto,
            UpdateBlogDto,
            AuthorDto,
            CategoryRefDto,
            BlogDto,
            CreatePostDto,
            CreatedPostDto,
            PostDeletedDto,
            PostDto
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and the current user"),
        (name = "users", description = "User administration"),
        (name = "categories", description = "Blog categories"),
        (name = "blogs", description = "Validated, owner-managed blog entries"),
        (name = "posts", description = "Lightweight posts feed")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn document_lists_every_resource_and_the_bearer_scheme() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/auth/register",
            "/api/users/{id}/role",
            "/api/categories/{id}",
            "/api/blogs/category/{category_id}",
            "/api/posts/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }

        let components = doc.components.expect("components must be present");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
