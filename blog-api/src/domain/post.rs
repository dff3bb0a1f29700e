use chrono::{DateTime, Utc};

use super::user::AuthorSummary;

/// Entry of the lightweight posts feed. Fields are stored as submitted.
#[derive(Debug, Clone)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) author_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct PopulatedPost {
    pub(crate) post: Post,
    pub(crate) author: Option<AuthorSummary>,
}
