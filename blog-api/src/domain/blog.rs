use chrono::{DateTime, Utc};

use super::error::DomainError;
use super::user::AuthorSummary;

#[derive(Debug, Clone)]
pub(crate) struct Blog {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category_id: i64,
    pub(crate) author_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct CreateBlogRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category_id: i64,
}

impl CreateBlogRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_positive_i64("category", self.category_id)?;
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(&self.content)?,
            category_id: self.category_id,
        })
    }
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub(crate) struct UpdateBlogRequest {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) category_id: Option<i64>,
}

impl Blog {
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        category_id: i64,
        author_id: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("category", category_id)?;
        validate_positive_i64("author", author_id)?;
        let title = normalize_title(&title.into())?;
        let content = normalize_content(&content.into())?;

        if updated_at < created_at {
            return Err(DomainError::Validation {
                field: "updated_at",
                message: "must be >= created_at",
            });
        }

        Ok(Self {
            id,
            title,
            content,
            category_id,
            author_id,
            created_at,
            updated_at,
        })
    }

    /// Merges a partial update and re-validates every field of the result.
    /// The author is never touched.
    pub(crate) fn apply(self, patch: UpdateBlogRequest) -> Result<Self, DomainError> {
        Blog::new(
            self.id,
            patch.title.unwrap_or(self.title),
            patch.content.unwrap_or(self.content),
            patch.category_id.unwrap_or(self.category_id),
            self.author_id,
            self.created_at,
            self.updated_at,
        )
    }

    pub(crate) fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategorySummary {
    pub(crate) id: i64,
    pub(crate) name: String,
}

/// A blog with its references resolved. A reference that no longer points at
/// a stored record is `None`.
#[derive(Debug, Clone)]
pub(crate) struct PopulatedBlog {
    pub(crate) blog: Blog,
    pub(crate) author: Option<AuthorSummary>,
    pub(crate) category: Option<CategorySummary>,
}

fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 255 {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::Validation {
            field: "content",
            message: "must not be empty",
        });
    }
    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{Blog, CreateBlogRequest, DomainError, UpdateBlogRequest};

    #[test]
    fn create_blog_request_validate_rejects_empty_title() {
        let req = CreateBlogRequest {
            title: "   ".to_string(),
            content: "valid content".to_string(),
            category_id: 1,
        };

        let err = req.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn create_blog_request_validate_rejects_bad_category() {
        let req = CreateBlogRequest {
            title: "title".to_string(),
            content: "content".to_string(),
            category_id: 0,
        };

        let err = req.validate().expect_err("category must be rejected");
        assert_validation_field(err, "category");
    }

    #[test]
    fn create_blog_request_validate_normalizes_fields() {
        let req = CreateBlogRequest {
            title: "  title  ".to_string(),
            content: "  content  ".to_string(),
            category_id: 3,
        };

        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, "title");
        assert_eq!(validated.content, "content");
        assert_eq!(validated.category_id, 3);
    }

    #[test]
    fn apply_keeps_unset_fields_and_author() {
        let blog = sample_blog();
        let updated = blog
            .apply(UpdateBlogRequest {
                title: Some("  New  ".to_string()),
                ..UpdateBlogRequest::default()
            })
            .expect("patch must apply");

        assert_eq!(updated.title, "New");
        assert_eq!(updated.content, "Content");
        assert_eq!(updated.category_id, 2);
        assert_eq!(updated.author_id, 10);
    }

    #[test]
    fn apply_revalidates_supplied_fields() {
        let err = sample_blog()
            .apply(UpdateBlogRequest {
                content: Some("  ".to_string()),
                ..UpdateBlogRequest::default()
            })
            .expect_err("blank content must fail");
        assert_validation_field(err, "content");
    }

    #[test]
    fn blog_new_rejects_updated_before_created() {
        let updated_at = Utc::now();
        let created_at = updated_at + Duration::seconds(1);

        let err = Blog::new(1, "Title", "Content", 2, 10, created_at, updated_at)
            .expect_err("updated_at < created_at must fail");
        assert_validation_field(err, "updated_at");
    }

    fn sample_blog() -> Blog {
        let now = Utc::now();
        Blog::new(1, "Title", "Content", 2, 10, now, now).expect("sample blog must be valid")
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
