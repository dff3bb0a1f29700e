use chrono::{DateTime, Utc};

use super::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct Category {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct CreateCategoryRequest {
    pub(crate) name: String,
}

impl CreateCategoryRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            name: normalize_name(&self.name)?,
        })
    }
}

impl Category {
    pub(crate) fn new(
        id: i64,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        let name = normalize_name(&name.into())?;
        Ok(Self {
            id,
            name,
            created_at,
        })
    }
}

fn normalize_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 64 {
        return Err(DomainError::Validation {
            field: "name",
            message: "must be 1..64 chars",
        });
    }
    Ok(name.to_string())
}
