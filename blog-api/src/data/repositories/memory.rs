use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::data::blog_repository::{BlogPatch, BlogRepository, NewBlog};
use crate::data::category_repository::{CategoryRepository, NewCategory};
use crate::data::post_repository::{NewPost, PostRepository};
use crate::data::user_repository::{NewUser, UserCredentials, UserRepository, UserUpdate};
use crate::domain::blog::Blog;
use crate::domain::category::Category;
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::user::{AuthorSummary, User};

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<UserCredentials>,
    categories: Vec<Category>,
    blogs: Vec<Blog>,
    posts: Vec<Post>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared in-memory backing for every repository trait, with the same
/// uniqueness and reference rules as the Postgres schema.
#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    failing: Arc<AtomicBool>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail like a dropped database connection.
    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn password_hash_of(&self, user_id: i64) -> Option<String> {
        self.lock()
            .users
            .iter()
            .find(|creds| creds.user.id == user_id)
            .map(|creds| creds.password_hash.clone())
    }

    pub(crate) fn blog_count(&self) -> usize {
        self.lock().blogs.len()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store mutex poisoned")
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::Unexpected("connection refused".to_string()));
        }
        Ok(self.lock())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut tables = self.tables()?;
        if tables.users.iter().any(|c| c.user.username == input.username) {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }
        if tables.users.iter().any(|c| c.user.email == input.email) {
            return Err(DomainError::AlreadyExists("email".to_string()));
        }

        let id = tables.next_id();
        let user = User::new(id, input.username, input.email, input.role, Utc::now())?;
        tables.users.push(UserCredentials {
            user: user.clone(),
            password_hash: input.password_hash,
        });
        Ok(user)
    }

    async fn update_user(&self, input: UserUpdate) -> Result<Option<User>, DomainError> {
        let mut tables = self.tables()?;
        let Some(creds) = tables.users.iter_mut().find(|c| c.user.id == input.id) else {
            return Ok(None);
        };
        creds.user.role = input.role;
        creds.password_hash = input.password_hash;
        Ok(Some(creds.user.clone()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let tables = self.tables()?;
        Ok(tables
            .users
            .iter()
            .find(|c| c.user.id == id)
            .map(|c| c.user.clone()))
    }

    async fn find_credentials_by_id(
        &self,
        id: i64,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let tables = self.tables()?;
        Ok(tables.users.iter().find(|c| c.user.id == id).cloned())
    }

    async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let tables = self.tables()?;
        Ok(tables
            .users
            .iter()
            .find(|c| c.user.username == username)
            .cloned())
    }

    async fn find_authors(&self, ids: &[i64]) -> Result<Vec<AuthorSummary>, DomainError> {
        let tables = self.tables()?;
        Ok(tables
            .users
            .iter()
            .filter(|c| ids.contains(&c.user.id))
            .map(|c| AuthorSummary {
                id: c.user.id,
                username: c.user.username.clone(),
            })
            .collect())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn create_category(&self, input: NewCategory) -> Result<Category, DomainError> {
        let mut tables = self.tables()?;
        if tables.categories.iter().any(|c| c.name == input.name) {
            return Err(DomainError::AlreadyExists("category".to_string()));
        }
        let id = tables.next_id();
        let category = Category::new(id, input.name, Utc::now())?;
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, DomainError> {
        let tables = self.tables()?;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let tables = self.tables()?;
        let mut categories = tables.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Category>, DomainError> {
        let tables = self.tables()?;
        Ok(tables
            .categories
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BlogRepository for MemoryStore {
    async fn create_blog(&self, input: NewBlog) -> Result<Blog, DomainError> {
        let mut tables = self.tables()?;
        if !tables.categories.iter().any(|c| c.id == input.category_id) {
            return Err(DomainError::not_found("Category"));
        }
        let id = tables.next_id();
        let now = Utc::now();
        let blog = Blog::new(
            id,
            input.title,
            input.content,
            input.category_id,
            input.author_id,
            now,
            now,
        )?;
        tables.blogs.push(blog.clone());
        Ok(blog)
    }

    async fn get_blog(&self, id: i64) -> Result<Option<Blog>, DomainError> {
        let tables = self.tables()?;
        Ok(tables.blogs.iter().find(|b| b.id == id).cloned())
    }

    async fn update_blog(&self, id: i64, patch: BlogPatch) -> Result<Option<Blog>, DomainError> {
        let mut tables = self.tables()?;
        if !tables.categories.iter().any(|c| c.id == patch.category_id) {
            return Err(DomainError::not_found("Category"));
        }
        let Some(blog) = tables.blogs.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        blog.title = patch.title;
        blog.content = patch.content;
        blog.category_id = patch.category_id;
        blog.updated_at = Utc::now();
        Ok(Some(blog.clone()))
    }

    async fn delete_blog(&self, id: i64) -> Result<bool, DomainError> {
        let mut tables = self.tables()?;
        let before = tables.blogs.len();
        tables.blogs.retain(|b| b.id != id);
        Ok(tables.blogs.len() < before)
    }

    async fn list_blogs(&self) -> Result<Vec<Blog>, DomainError> {
        let tables = self.tables()?;
        Ok(tables.blogs.clone())
    }

    async fn list_by_category(&self, category_id: i64) -> Result<Vec<Blog>, DomainError> {
        let tables = self.tables()?;
        Ok(tables
            .blogs
            .iter()
            .filter(|b| b.category_id == category_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut tables = self.tables()?;
        let id = tables.next_id();
        let now = Utc::now();
        let post = Post {
            id,
            title: input.title,
            content: input.content,
            author_id: input.author_id,
            created_at: now,
            updated_at: now,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let tables = self.tables()?;
        Ok(tables.posts.clone())
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let mut tables = self.tables()?;
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        Ok(tables.posts.len() < before)
    }
}
