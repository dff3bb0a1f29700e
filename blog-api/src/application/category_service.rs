use std::sync::Arc;

use crate::data::category_repository::{CategoryRepository, NewCategory};
use crate::domain::category::{Category, CreateCategoryRequest};
use crate::domain::error::DomainError;

pub(crate) struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub(crate) fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_category(
        &self,
        req: CreateCategoryRequest,
    ) -> Result<Category, DomainError> {
        let req = req.validate()?;
        self.repo.create_category(NewCategory { name: req.name }).await
    }

    pub(crate) async fn get_category(&self, id: i64) -> Result<Category, DomainError> {
        self.repo
            .get_category(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category"))
    }

    pub(crate) async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.repo.list_categories().await
    }
}
