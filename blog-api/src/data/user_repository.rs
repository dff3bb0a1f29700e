use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::{AuthorSummary, Role, User};

/// A user together with the stored password hash. Only authentication and
/// account updates read this; every other query returns a plain `User`.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) role: Role,
}

#[derive(Debug, Clone)]
pub(crate) struct UserUpdate {
    pub(crate) id: i64,
    pub(crate) role: Role,
    pub(crate) password_hash: String,
}

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError>;
    async fn update_user(&self, input: UserUpdate) -> Result<Option<User>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
    async fn find_credentials_by_id(
        &self,
        id: i64,
    ) -> Result<Option<UserCredentials>, DomainError>;
    async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError>;
    async fn find_authors(&self, ids: &[i64]) -> Result<Vec<AuthorSummary>, DomainError>;
}
