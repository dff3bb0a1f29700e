use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::DomainError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?-u:\w)+([.-]?(?-u:\w)+)*@(?-u:\w)+([.-]?(?-u:\w)+)*(\.(?-u:\w){2,3})+$")
        .expect("email regex must compile")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    #[default]
    Author,
    Admin,
}

impl Role {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Role::Author => "author",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "author" => Ok(Role::Author),
            "admin" => Ok(Role::Admin),
            _ => Err(DomainError::Validation {
                field: "role",
                message: "must be one of: author, admin",
            }),
        }
    }
}

/// Password field of a user record as it travels towards storage.
///
/// Only `Plain` is hashed on save; a `Hashed` value is the stored PHC string
/// and is written back as is.
#[derive(Clone)]
pub(crate) enum Password {
    Plain(String),
    Hashed(String),
}

impl Password {
    pub(crate) fn is_modified(&self) -> bool {
        matches!(self, Password::Plain(_))
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Password::Plain(_) => f.write_str("Password::Plain(***)"),
            Password::Hashed(_) => f.write_str("Password::Hashed(***)"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = normalize_username(&self.username)?;
        let email = normalize_email(&self.email)?;
        validate_password(&self.password)?;
        Ok(Self {
            username,
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() || username.len() > 64 {
            return Err(DomainError::Validation {
                field: "username",
                message: "must be 1..64 chars",
            });
        }

        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            username: username.to_string(),
            password: self.password,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ChangePasswordRequest {
    pub(crate) current_password: String,
    pub(crate) new_password: String,
}

impl ChangePasswordRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        if self.current_password.is_empty() {
            return Err(DomainError::Validation {
                field: "current_password",
                message: "must not be empty",
            });
        }
        validate_password(&self.new_password)?;
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) role: Role,
    pub(crate) created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(
        id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        let username = normalize_username(&username.into())?;
        let email = normalize_email(&email.into())?;

        Ok(Self {
            id,
            username,
            email,
            role,
            created_at,
        })
    }

    pub(crate) fn actor(&self) -> Actor {
        Actor {
            user_id: self.id,
            role: self.role,
        }
    }
}

/// The authenticated caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Actor {
    pub(crate) user_id: i64,
    pub(crate) role: Role,
}

impl Actor {
    pub(crate) fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Populated view of a user reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AuthorSummary {
    pub(crate) id: i64,
    pub(crate) username: String,
}

fn normalize_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    let len = username.chars().count();
    if !(3..=64).contains(&len) {
        return Err(DomainError::Validation {
            field: "username",
            message: "must be 3..64 chars",
        });
    }
    Ok(username.to_string())
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !EMAIL_RE.is_match(&email) {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}

fn validate_password(password: &str) -> Result<(), DomainError> {
    let len = password.chars().count();
    if !(6..=128).contains(&len) {
        return Err(DomainError::Validation {
            field: "password",
            message: "must be 6..128 chars",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        ChangePasswordRequest, Password, RegisterRequest, Role, User, normalize_email,
        normalize_username,
    };
    use chrono::Utc;

    #[test]
    fn user_new_rejects_non_positive_id() {
        let result = User::new(0, "valid_user", "test@example.com", Role::Author, Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  TeSt@Example.COM ").expect("must be valid");
        assert_eq!(value, "test@example.com");
    }

    #[test]
    fn normalize_email_rejects_malformed_addresses() {
        assert!(normalize_email("alice").is_err());
        assert!(normalize_email("alice@x").is_err());
        assert!(normalize_email("alice@x.comxx").is_err());
        assert!(normalize_email("al ice@x.com").is_err());
        assert!(normalize_email("alice.b-c@mail.x.io").is_ok());
    }

    #[test]
    fn normalize_email_accepts_only_ascii_word_characters() {
        assert!(normalize_email("ünï@x.com").is_err());
        assert!(normalize_email("alice@exämple.com").is_err());
        assert!(normalize_email("al_ice9@x.com").is_ok());
    }

    #[test]
    fn username_is_trimmed_and_needs_three_chars() {
        assert!(normalize_username("ab").is_err());
        assert!(normalize_username("  ab  ").is_err());
        assert_eq!(normalize_username("  alice ").expect("valid"), "alice");
    }

    #[test]
    fn register_password_needs_six_chars() {
        let short = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(short.validate().is_err());

        let ok = RegisterRequest {
            username: " alice ".to_string(),
            email: "Alice@X.com".to_string(),
            password: "secret1".to_string(),
        };
        let validated = ok.validate().expect("must be valid");
        assert_eq!(validated.username, "alice");
        assert_eq!(validated.email, "alice@x.com");
        assert_eq!(validated.password, "secret1");
    }

    #[test]
    fn change_password_checks_new_password_length() {
        let req = ChangePasswordRequest {
            current_password: "secret1".to_string(),
            new_password: "abc".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn role_parses_and_defaults_to_author() {
        assert_eq!(Role::default(), Role::Author);
        assert_eq!("admin".parse::<Role>().expect("valid role"), Role::Admin);
        assert!("editor".parse::<Role>().is_err());
    }

    #[test]
    fn password_debug_never_prints_secret() {
        let rendered = format!("{:?}", Password::Plain("hunter22".to_string()));
        assert!(!rendered.contains("hunter22"));
        assert!(Password::Plain(String::new()).is_modified());
        assert!(!Password::Hashed(String::new()).is_modified());
    }
}
