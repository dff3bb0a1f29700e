use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::data::blog_repository::{BlogPatch, BlogRepository, NewBlog};
use crate::domain::blog::Blog;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresBlogRepository {
    pool: PgPool,
}

impl PostgresBlogRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct BlogRow {
    id: i64,
    title: String,
    content: String,
    category_id: i64,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn create_blog(&self, input: NewBlog) -> Result<Blog, DomainError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            INSERT INTO blogs (title, content, category_id, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, category_id, author_id, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.category_id)
        .bind(input.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_blog_db_error)?;

        map_row_to_blog(row)
    }

    async fn get_blog(&self, id: i64) -> Result<Option<Blog>, DomainError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT
            id,
            title,
            content,
            category_id,
            author_id,
            created_at,
            updated_at
            FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_blog_db_error)?;

        row.map(map_row_to_blog).transpose()
    }

    async fn update_blog(&self, id: i64, patch: BlogPatch) -> Result<Option<Blog>, DomainError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            UPDATE blogs
            SET title = $2,
                content = $3,
                category_id = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, content, category_id, author_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.content)
        .bind(patch.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_blog_db_error)?;

        row.map(map_row_to_blog).transpose()
    }

    async fn delete_blog(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_blog_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_blogs(&self) -> Result<Vec<Blog>, DomainError> {
        let rows = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT
                id,
                title,
                content,
                category_id,
                author_id,
                created_at,
                updated_at
            FROM blogs
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_blog_db_error)?;

        rows.into_iter().map(map_row_to_blog).collect()
    }

    async fn list_by_category(&self, category_id: i64) -> Result<Vec<Blog>, DomainError> {
        let rows = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT
                id,
                title,
                content,
                category_id,
                author_id,
                created_at,
                updated_at
            FROM blogs
            WHERE category_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_blog_db_error)?;

        rows.into_iter().map(map_row_to_blog).collect()
    }
}

fn map_row_to_blog(row: BlogRow) -> Result<Blog, DomainError> {
    Blog::new(
        row.id,
        row.title,
        row.content,
        row.category_id,
        row.author_id,
        row.created_at,
        row.updated_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

// A foreign key violation means the referenced row vanished between the
// existence check and the write.
fn map_blog_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        let resource = match db_err.constraint() {
            Some("blogs_category_id_fkey") => "Category",
            Some("blogs_author_id_fkey") => "Author",
            _ => "Reference",
        };
        return DomainError::not_found(resource);
    }
    DomainError::Unexpected(err.to_string())
}
