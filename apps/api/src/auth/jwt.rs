// JWT token creation and verification
// HS256 tokens carrying the user id, with a configurable lifetime

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (user_id)
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID (subject)
    pub sub: Uuid,
    /// Expiry timestamp (seconds since epoch)
    pub exp: usize,
}

/// Signing secret and token lifetime shared by the handlers
///
/// The token cookie set on login lives as long as the token itself.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub ttl: Duration,
    /// Mark the token cookie `Secure`
    pub secure_cookie: bool,
}

impl JwtSettings {
    /// `expire_hours` is expected within the range `Config` accepts
    pub fn new(secret: impl Into<String>, expire_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::hours(expire_hours),
            secure_cookie: false,
        }
    }

    pub fn with_secure_cookie(mut self, secure: bool) -> Self {
        self.secure_cookie = secure;
        self
    }

    /// Issues a token for `user_id`
    pub fn issue(&self, user_id: Uuid) -> Result<String, String> {
        create_token(user_id, &self.secret, self.ttl)
    }

    /// Verifies a token signed with these settings
    pub fn verify(&self, token: &str) -> Result<Claims, String> {
        verify_token(token, &self.secret)
    }
}

/// Creates a JWT token for a user
///
/// # Arguments
/// * `user_id` - The user's ID to include in the token
/// * `secret` - The secret key for signing
/// * `ttl` - How long the token stays valid
///
/// # Example
/// ```
/// use devcamper_api::auth::jwt::create_token;
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// let token = create_token(Uuid::new_v4(), "your-secret-key", Duration::days(30))
///     .expect("valid token");
/// ```
pub fn create_token(user_id: Uuid, secret: &str, ttl: Duration) -> Result<String, String> {
    let expiry = Utc::now() + ttl;
    let claims = Claims {
        sub: user_id,
        exp: expiry.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| e.to_string())
}

/// Verifies and decodes a JWT token
///
/// # Returns
/// * `Ok(Claims)` - The decoded claims if token is valid
/// * `Err(String)` - If token is invalid or expired
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-unit-tests";

    #[test]
    fn create_and_verify_token() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id, TEST_SECRET, Duration::hours(1)).expect("valid token");

        let claims = verify_token(&token, TEST_SECRET).expect("valid verification");
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn wrong_secret_fails() {
        let token = create_token(Uuid::new_v4(), TEST_SECRET, Duration::hours(1)).unwrap();
        assert!(verify_token(&token, "wrong-secret").is_err());
    }

    #[test]
    fn invalid_token_fails() {
        assert!(verify_token("invalid.token.string", TEST_SECRET).is_err());
    }

    #[test]
    fn expired_token_fails() {
        // well past the default validation leeway
        let token = create_token(Uuid::new_v4(), TEST_SECRET, Duration::hours(-1)).unwrap();
        assert!(verify_token(&token, TEST_SECRET).is_err());
    }

    #[test]
    fn settings_apply_configured_lifetime() {
        let settings = JwtSettings::new(TEST_SECRET, 720);
        let token = settings.issue(Uuid::new_v4()).unwrap();

        let claims = settings.verify(&token).unwrap();
        let in_30_days = (Utc::now() + Duration::days(30)).timestamp();
        assert!(claims.exp as i64 > Utc::now().timestamp());
        assert!(claims.exp as i64 <= in_30_days + 10);
    }
}
