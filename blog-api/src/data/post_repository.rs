use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) author_id: i64,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn list_posts(&self) -> Result<Vec<Post>, DomainError>;
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;
}
