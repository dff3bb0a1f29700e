use sqlx::PgPool;
use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::blog_service::BlogService;
use crate::application::category_service::CategoryService;
use crate::application::post_service::PostService;
use crate::data::blog_repository::BlogRepository;
use crate::data::category_repository::CategoryRepository;
use crate::data::post_repository::PostRepository;
use crate::data::repositories::postgres::blog_repository::PostgresBlogRepository;
use crate::data::repositories::postgres::category_repository::PostgresCategoryRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;
use crate::data::user_repository::UserRepository;
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::password::PasswordService;

pub(crate) mod http;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService>,
    pub(crate) category_service: Arc<CategoryService>,
    pub(crate) blog_service: Arc<BlogService>,
    pub(crate) post_service: Arc<PostService>,
}

/// Storage backends the services are wired over.
pub(crate) struct Repositories {
    pub(crate) users: Arc<dyn UserRepository>,
    pub(crate) categories: Arc<dyn CategoryRepository>,
    pub(crate) blogs: Arc<dyn BlogRepository>,
    pub(crate) posts: Arc<dyn PostRepository>,
}

impl Repositories {
    pub(crate) fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(pool.clone())),
            blogs: Arc::new(PostgresBlogRepository::new(pool.clone())),
            posts: Arc::new(PostgresPostRepository::new(pool)),
        }
    }
}

impl AppState {
    pub(crate) fn new(repos: Repositories, jwt: Arc<JwtService>, passwords: PasswordService) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(repos.users.clone(), jwt, passwords)),
            category_service: Arc::new(CategoryService::new(repos.categories.clone())),
            blog_service: Arc::new(BlogService::new(
                repos.blogs,
                repos.categories,
                repos.users.clone(),
            )),
            post_service: Arc::new(PostService::new(repos.posts, repos.users)),
        }
    }
}
