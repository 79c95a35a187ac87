//! Password hashing for stored credentials.
//!
//! Hashes are Argon2id PHC strings (`$argon2id$v=19$...`). A stored value
//! that does not parse as a PHC string never verifies.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hashing failed")]
    HashingFailed,
}

pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordError::HashingFailed)
}

/// Constant-time check of `password` against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return Ok(false);
    };

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Whether a stored value is already a hash rather than a legacy plaintext
pub fn is_hashed(stored: &str) -> bool {
    stored.starts_with("$argon2") && PasswordHash::new(stored).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_hashed_password() {
        let hash = hash_password("touchdown").unwrap();
        assert!(is_hashed(&hash));
        assert!(verify_password("touchdown", &hash).unwrap());
        assert!(!verify_password("fieldgoal", &hash).unwrap());
    }

    #[test]
    fn plaintext_is_not_a_hash() {
        assert!(!is_hashed("touchdown"));
        assert!(!verify_password("touchdown", "touchdown").unwrap());
    }

    #[test]
    fn salts_differ() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }
}
