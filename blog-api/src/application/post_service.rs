use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::debug;

use crate::data::post_repository::{NewPost, PostRepository};
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, PopulatedPost, Post};

/// Backs the lightweight posts feed. Unlike blogs, posts take their fields
/// as submitted and deletion does not report missing ids.
pub(crate) struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub(crate) fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<PopulatedPost>, DomainError> {
        let posts = self.posts.list_posts().await?;
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: Vec<i64> = posts
            .iter()
            .map(|p| p.author_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let authors: HashMap<i64, _> = self
            .users
            .find_authors(&author_ids)
            .await?
            .into_iter()
            .map(|author| (author.id, author))
            .collect();

        Ok(posts
            .into_iter()
            .map(|post| PopulatedPost {
                author: authors.get(&post.author_id).cloned(),
                post,
            })
            .collect())
    }

    pub(crate) async fn create_post(
        &self,
        author_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        self.posts
            .create_post(NewPost {
                title: req.title,
                content: req.content,
                author_id,
            })
            .await
    }

    pub(crate) async fn delete_post(&self, id: i64) -> Result<(), DomainError> {
        let deleted = self.posts.delete_post(id).await?;
        debug!(post_id = id, deleted, "post delete requested");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::PostService;
    use crate::data::repositories::memory::MemoryStore;
    use crate::data::user_repository::{NewUser, UserRepository};
    use crate::domain::post::CreatePostRequest;
    use crate::domain::user::Role;

    async fn setup() -> (PostService, i64) {
        let store = MemoryStore::new();
        let alice = store
            .create_user(NewUser {
                username: "alice".to_string(),
                email: "alice@x.com".to_string(),
                password_hash: "$argon2id$stub".to_string(),
                role: Role::Author,
            })
            .await
            .expect("user must be created")
            .id;
        let service = PostService::new(Arc::new(store.clone()), Arc::new(store));
        (service, alice)
    }

    #[tokio::test]
    async fn create_post_accepts_missing_fields() {
        let (service, alice) = setup().await;

        let post = service
            .create_post(alice, CreatePostRequest::default())
            .await
            .expect("create must succeed");

        assert_eq!(post.author_id, alice);
        assert!(post.title.is_none());
        assert!(post.content.is_none());
    }

    #[tokio::test]
    async fn list_posts_populates_author() {
        let (service, alice) = setup().await;
        service
            .create_post(
                alice,
                CreatePostRequest {
                    title: Some("hello".to_string()),
                    content: None,
                },
            )
            .await
            .expect("create");

        let posts = service.list_posts().await.expect("list");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].post.title.as_deref(), Some("hello"));
        assert_eq!(
            posts[0].author.as_ref().map(|a| a.username.as_str()),
            Some("alice")
        );
    }

    #[tokio::test]
    async fn delete_of_unknown_post_succeeds() {
        let (service, _) = setup().await;
        service.delete_post(12345).await.expect("no-op delete");
    }
}
