use async_trait::async_trait;

use crate::domain::category::Category;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewCategory {
    pub(crate) name: String,
}

#[async_trait]
pub(crate) trait CategoryRepository: Send + Sync {
    async fn create_category(&self, input: NewCategory) -> Result<Category, DomainError>;
    async fn get_category(&self, id: i64) -> Result<Option<Category>, DomainError>;
    async fn list_categories(&self) -> Result<Vec<Category>, DomainError>;
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Category>, DomainError>;
}
