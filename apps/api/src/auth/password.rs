// bcrypt hashing for stored credentials

use bcrypt::{hash, verify, BcryptError};
use thiserror::Error;

use crate::domain::user::validate_password;

/// bcrypt work factor for new hashes
pub const HASH_COST: u32 = 10;

#[derive(Debug, Error)]
pub enum PasswordError {
    /// The plaintext was rejected before hashing; the message is user-facing
    #[error("{0}")]
    Rejected(String),

    #[error("password hashing failed: {0}")]
    Bcrypt(#[from] BcryptError),
}

/// Hashes a new password for storage
///
/// Passwords shorter than [`crate::domain::user::MIN_PASSWORD_LENGTH`]
/// characters are rejected without spending any bcrypt rounds.
///
/// # Example
/// ```
/// use devcamper_api::auth::password::hash_password;
///
/// let stored = hash_password("123456").expect("long enough");
/// assert!(stored.starts_with("$2b$10$"));
/// assert!(hash_password("12345").is_err());
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    validate_password(password).map_err(PasswordError::Rejected)?;
    Ok(hash(password, HASH_COST)?)
}

/// Checks a login attempt against a stored hash
///
/// A stored value that is not a bcrypt hash is an error, not a mismatch.
pub fn verify_password(attempt: &str, stored: &str) -> Result<bool, PasswordError> {
    Ok(verify(attempt, stored)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MIN_PASSWORD_LENGTH;

    #[test]
    fn short_passwords_are_rejected_before_hashing() {
        let short = "x".repeat(MIN_PASSWORD_LENGTH - 1);

        match hash_password(&short) {
            Err(PasswordError::Rejected(message)) => {
                assert_eq!(message, "Password must be at least 6 characters")
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn minimum_length_counts_characters_not_bytes() {
        // six characters, twelve bytes
        let stored = hash_password("пароль").expect("six characters is enough");
        assert!(verify_password("пароль", &stored).unwrap());
    }

    #[test]
    fn new_hashes_use_the_configured_cost() {
        let stored = hash_password("123456").unwrap();
        assert!(stored.starts_with(&format!("$2b${}$", HASH_COST)));
    }

    #[test]
    fn login_attempts_must_match_exactly() {
        let stored = hash_password("123456").unwrap();

        assert!(verify_password("123456", &stored).unwrap());
        assert!(!verify_password("1234567", &stored).unwrap());
        assert!(!verify_password("123456 ", &stored).unwrap());
    }

    #[test]
    fn hashes_made_at_another_cost_still_verify() {
        let seeded = bcrypt::hash("123456", 4).unwrap();
        assert!(verify_password("123456", &seeded).unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(matches!(
            verify_password("123456", "not-a-bcrypt-hash"),
            Err(PasswordError::Bcrypt(_))
        ));
    }
}
