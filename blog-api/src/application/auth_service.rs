use std::sync::Arc;

use tracing::{debug, info};

use crate::data::user_repository::{NewUser, UserCredentials, UserRepository, UserUpdate};
use crate::domain::error::DomainError;
use crate::domain::user::{ChangePasswordRequest, LoginRequest, Password, RegisterRequest, Role, User};
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::password::PasswordService;

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) access_token: String,
}

pub(crate) struct AuthService {
    repo: Arc<dyn UserRepository>,
    jwt: Arc<JwtService>,
    passwords: PasswordService,
}

impl AuthService {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new(
        repo: Arc<dyn UserRepository>,
        jwt: Arc<JwtService>,
        passwords: PasswordService,
    ) -> Self {
        Self {
            repo,
            jwt,
            passwords,
        }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let password_hash = self.passwords.seal(Password::Plain(req.password))?;
        let user = self
            .repo
            .create_user(NewUser {
                username: req.username,
                email: req.email,
                password_hash,
                role: Role::default(),
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "user registered");
        self.authenticated(user)
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let Some(creds) = self.repo.find_credentials_by_username(&req.username).await? else {
            // keep timing close to the "wrong password" path
            let _ = self
                .passwords
                .matches(&req.password, Self::DUMMY_PASSWORD_HASH);
            return Err(DomainError::InvalidCredentials);
        };

        if !self.passwords.matches(&req.password, &creds.password_hash)? {
            return Err(DomainError::InvalidCredentials);
        }

        self.authenticated(creds.user)
    }

    /// Resolves a token subject to the current user record.
    pub(crate) async fn resolve_caller(&self, user_id: i64) -> Result<Option<User>, DomainError> {
        self.repo.find_by_id(user_id).await
    }

    pub(crate) fn verify_token(&self, token: &str) -> Option<i64> {
        self.jwt.verify(token).ok().map(|claims| claims.sub)
    }

    pub(crate) async fn change_password(
        &self,
        user_id: i64,
        req: ChangePasswordRequest,
    ) -> Result<User, DomainError> {
        let req = req.validate()?;
        let creds = self.load_credentials(user_id).await?;

        if !self
            .passwords
            .matches(&req.current_password, &creds.password_hash)?
        {
            return Err(DomainError::InvalidCredentials);
        }

        let role = creds.user.role;
        self.save_user(user_id, role, Password::Plain(req.new_password))
            .await
    }

    pub(crate) async fn change_role(&self, user_id: i64, role: Role) -> Result<User, DomainError> {
        let creds = self.load_credentials(user_id).await?;
        let user = self
            .save_user(user_id, role, Password::Hashed(creds.password_hash))
            .await?;

        info!(user_id, role = %role, "user role changed");
        Ok(user)
    }

    /// Writes the mutable user fields back. The password is re-hashed only
    /// when it was modified.
    pub(crate) async fn save_user(
        &self,
        user_id: i64,
        role: Role,
        password: Password,
    ) -> Result<User, DomainError> {
        debug!(user_id, rehash = password.is_modified(), "saving user");
        let password_hash = self.passwords.seal(password)?;
        self.repo
            .update_user(UserUpdate {
                id: user_id,
                role,
                password_hash,
            })
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    async fn load_credentials(&self, user_id: i64) -> Result<UserCredentials, DomainError> {
        self.repo
            .find_credentials_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    fn authenticated(&self, user: User) -> Result<AuthResult, DomainError> {
        let access_token = self
            .jwt
            .issue(&user)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(AuthResult { user, access_token })
    }
}
