use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;

use crate::error::{Error, Result};

const GENERATED_PASSWORD_BYTES: usize = 18;

/// Argon2id hashing for the admin password. Hashes are PHC strings with an
/// embedded per-hash salt.
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Argon2Hasher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
        }
    }

    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| Error::PasswordHash(format!("failed to hash password: {e}")))?;
        Ok(hash.to_string())
    }

    /// Returns `Ok(false)` on a mismatch. Malformed stored hashes are errors.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| Error::PasswordHash(format!("invalid hash format: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(Error::PasswordHash(format!("failed to verify password: {e}"))),
        }
    }

    /// Stand-in for `verify` when there is no stored hash. Runs one Argon2
    /// pass with the same parameters and always fails, so an unknown
    /// username costs as much as a wrong password.
    pub fn verify_absent(&self, password: &str) -> bool {
        let salt = SaltString::generate(&mut OsRng);
        let _ = self.argon2.hash_password(password.as_bytes(), &salt);
        false
    }
}

/// Random password for non-interactive initialization.
#[must_use]
pub fn generate_password() -> String {
    let mut bytes = [0u8; GENERATED_PASSWORD_BYTES];
    rand::thread_rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_format() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("hunter22").unwrap();

        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = Argon2Hasher::new();
        let a = hasher.hash("hunter22").unwrap();
        let b = hasher.hash("hunter22").unwrap();

        assert_ne!(a, b);
        assert!(hasher.verify("hunter22", &a).unwrap());
        assert!(hasher.verify("hunter22", &b).unwrap());
    }

    #[test]
    fn test_verify_wrong_password() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("correct horse").unwrap();

        assert!(!hasher.verify("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_verify_absent_always_fails() {
        let hasher = Argon2Hasher::new();
        assert!(!hasher.verify_absent("correct horse"));
        assert!(!hasher.verify_absent(""));
    }

    #[test]
    fn test_verify_malformed_hash() {
        let hasher = Argon2Hasher::new();
        assert!(matches!(
            hasher.verify("anything", "not-a-phc-string"),
            Err(Error::PasswordHash(_))
        ));
    }

    #[test]
    fn test_generated_password_shape() {
        let password = generate_password();
        assert_eq!(password.len(), 24);
        assert!(
            password
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_ne!(password, generate_password());
    }
}
