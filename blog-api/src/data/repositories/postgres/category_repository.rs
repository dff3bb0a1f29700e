use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::data::category_repository::{CategoryRepository, NewCategory};
use crate::domain::category::Category;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create_category(&self, input: NewCategory) -> Result<Category, DomainError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(&input.name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        map_row_to_category(row)
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, DomainError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, created_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        row.map(map_row_to_category).transpose()
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, created_at
            FROM categories
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        rows.into_iter().map(map_row_to_category).collect()
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Category>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, created_at
            FROM categories
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        rows.into_iter().map(map_row_to_category).collect()
    }
}

fn map_row_to_category(row: CategoryRow) -> Result<Category, DomainError> {
    Category::new(row.id, row.name, row.created_at)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_category_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23505")
    {
        return DomainError::AlreadyExists("category".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
