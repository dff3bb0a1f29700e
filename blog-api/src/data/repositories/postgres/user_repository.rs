use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::data::user_repository::{NewUser, UserCredentials, UserRepository, UserUpdate};
use crate::domain::error::DomainError;
use crate::domain::user::{AuthorSummary, Role, User};

#[derive(Debug, Clone)]
pub(crate) struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct UserCredentialsRow {
    id: i64,
    username: String,
    email: String,
    role: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct AuthorRow {
    id: i64,
    username: String,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, role, created_at
            "#,
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(input.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        map_row_to_user(row)
    }

    async fn update_user(&self, input: UserUpdate) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET role = $2,
                password_hash = $3
            WHERE id = $1
            RETURNING id, username, email, role, created_at
            "#,
        )
        .bind(input.id)
        .bind(input.role.as_str())
        .bind(&input.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        row.map(map_row_to_user).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        row.map(map_row_to_user).transpose()
    }

    async fn find_credentials_by_id(
        &self,
        id: i64,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(
            r#"
            SELECT id, username, email, role, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        row.map(map_row_to_credentials).transpose()
    }

    async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(
            r#"
            SELECT id, username, email, role, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        row.map(map_row_to_credentials).transpose()
    }

    async fn find_authors(&self, ids: &[i64]) -> Result<Vec<AuthorSummary>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, username
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| AuthorSummary {
                id: row.id,
                username: row.username,
            })
            .collect())
    }
}

fn map_row_to_user(row: UserRow) -> Result<User, DomainError> {
    let role = row
        .role
        .parse::<Role>()
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;
    User::new(row.id, row.username, row.email, role, row.created_at)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_row_to_credentials(row: UserCredentialsRow) -> Result<UserCredentials, DomainError> {
    let user = map_row_to_user(UserRow {
        id: row.id,
        username: row.username,
        email: row.email,
        role: row.role,
        created_at: row.created_at,
    })?;

    Ok(UserCredentials {
        user,
        password_hash: row.password_hash,
    })
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23505")
    {
        let resource = match db_err.constraint() {
            Some("users_username_key") => "username",
            Some("users_email_key") => "email",
            _ => "user",
        };
        return DomainError::AlreadyExists(resource.to_string());
    }
    DomainError::Unexpected(err.to_string())
}
