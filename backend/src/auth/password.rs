use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::error;

/// Hash a password using Argon2id with a random salt.
///
/// The default parameters are the process-wide work factor.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Failed to hash password: {}", e);
            anyhow::anyhow!("Failed to hash password: {}", e)
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored digest.
///
/// A digest that cannot be parsed indicates store corruption and is an
/// error, not a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash).map_err(|e| {
        error!("Invalid password hash: {}", e);
        anyhow::anyhow!("Invalid password hash: {}", e)
    })?;

    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    Ok(is_valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "secret1";

        let hash = hash_password(password).expect("Should hash password");
        assert_ne!(hash, password, "Digest must never equal the plaintext");

        let verified = verify_password(password, &hash).expect("Should verify password");
        assert!(verified, "Password verification should succeed");

        let verified_wrong = verify_password("wrong", &hash).expect("Should verify password");
        assert!(!verified_wrong, "Wrong password verification should fail");
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let a = hash_password("secret1").expect("Should hash password");
        let b = hash_password("secret1").expect("Should hash password");
        assert_ne!(a, b, "Random salts should produce distinct digests");
    }

    #[test]
    fn test_malformed_digest_is_an_error() {
        let result = verify_password("secret1", "not-a-digest");
        assert!(result.is_err(), "Malformed digest should surface as an error");
    }
}
