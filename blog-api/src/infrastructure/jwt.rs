use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::user::{Role, User};

#[derive(Debug, Error)]
pub(crate) enum JwtError {
    #[error("token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token decode/validation failed")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Claims {
    pub(crate) sub: i64,
    pub(crate) username: String,
    /// Role at issue time. Informational only: the gates re-read the role
    /// from the user store on every request.
    pub(crate) role: Role,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
}

pub(crate) struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl JwtService {
    const DEFAULT_TTL_SECONDS: i64 = 24 * 60 * 60;
    const LEEWAY_SECONDS: u64 = 10;

    pub(crate) fn new(secret: &str, ttl_seconds: i64) -> Self {
        let ttl_seconds = if ttl_seconds > 0 {
            ttl_seconds
        } else {
            Self::DEFAULT_TTL_SECONDS
        };

        JwtService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    pub(crate) fn issue(&self, user: &User) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_seconds)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(JwtError::Encode)
    }

    pub(crate) fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = Self::LEEWAY_SECONDS;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(JwtError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::JwtService;
    use crate::domain::user::{Role, User};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let jwt = JwtService::new(SECRET, 3600);
        let token = jwt.issue(&sample_user()).expect("token must be issued");

        let claims = jwt.verify(&token).expect("token must verify");
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let issuer = JwtService::new("ffffffffffffffffffffffffffffffff", 3600);
        let token = issuer.issue(&sample_user()).expect("token must be issued");

        let jwt = JwtService::new(SECRET, 3600);
        assert!(jwt.verify(&token).is_err());
        assert!(jwt.verify("not-a-token").is_err());
    }

    fn sample_user() -> User {
        User::new(7, "alice", "alice@x.com", Role::Admin, Utc::now()).expect("valid user")
    }
}
