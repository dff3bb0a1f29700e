use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use crate::domain::error::DomainError;
use crate::domain::user::Password;

/// Argon2id hashing with a fresh salt per hash.
#[derive(Debug, Clone)]
pub(crate) struct PasswordService {
    params: Params,
}

impl PasswordService {
    pub(crate) fn new() -> Result<Self, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Self { params })
    }

    /// Minimal cost parameters; verification reads the parameters from the
    /// PHC string, so hashes stay interchangeable.
    #[cfg(test)]
    pub(crate) fn fast() -> Self {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("valid argon2 params");
        Self { params }
    }

    pub(crate) fn hash(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = self
            .argon2()
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    /// `true` iff `candidate` hashes to `password_hash`.
    pub(crate) fn matches(&self, candidate: &str, password_hash: &str) -> Result<bool, DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        match self
            .argon2()
            .verify_password(candidate.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(err) => Err(DomainError::Unexpected(err.to_string())),
        }
    }

    /// Produces the value to store: a modified password is hashed, a stored
    /// hash passes through untouched.
    pub(crate) fn seal(&self, password: Password) -> Result<String, DomainError> {
        match password {
            Password::Plain(raw) => self.hash(&raw),
            Password::Hashed(hash) => Ok(hash),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::PasswordService;
    use crate::domain::user::Password;

    #[test]
    fn stored_password_matches_only_itself() {
        let service = PasswordService::fast();
        for raw in ["secret1", "päss wörd", "123456789012345678901234567890"] {
            let hash = service.hash(raw).expect("hash must be created");
            assert_ne!(hash, raw);
            assert!(service.matches(raw, &hash).expect("verify must run"));
            assert!(!service.matches(&format!("{raw}x"), &hash).expect("verify must run"));
            assert!(!service.matches("", &hash).expect("verify must run"));
        }
    }

    #[test]
    fn same_password_gets_fresh_salt() {
        let service = PasswordService::fast();
        let first = service.hash("secret1").expect("hash");
        let second = service.hash("secret1").expect("hash");
        assert_ne!(first, second);
    }

    #[test]
    fn seal_hashes_plain_and_keeps_stored_hash() {
        let service = PasswordService::fast();
        let hash = service
            .seal(Password::Plain("secret1".to_string()))
            .expect("seal plain");
        assert!(hash.starts_with("$argon2id$"));

        let resealed = service
            .seal(Password::Hashed(hash.clone()))
            .expect("seal hashed");
        assert_eq!(resealed, hash);
    }

    #[test]
    fn production_params_verify_fast_hashes() {
        let fast = PasswordService::fast();
        let hash = fast.hash("secret1").expect("hash");
        let strict = PasswordService::new().expect("params");
        assert!(strict.matches("secret1", &hash).expect("verify must run"));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let service = PasswordService::fast();
        assert!(service.matches("secret1", "plaintext").is_err());
    }
}
