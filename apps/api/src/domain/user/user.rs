use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::value_objects::{Email, Role};

/// Minimum number of characters in a password
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A registered user
///
/// The password hash never leaves the service: it is skipped on serialization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Email,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(serialize_with = "crate::domain::timestamp::serialize")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Validated data for inserting a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub password_hash: String,
}

impl NewUser {
    /// Builds a new user from already validated parts
    ///
    /// # Errors
    /// Returns an error if the name is blank.
    pub fn new(
        name: &str,
        email: Email,
        role: Role,
        password_hash: String,
    ) -> Result<Self, String> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: validate_name(name)?,
            email,
            role,
            password_hash,
        })
    }
}

/// Partial update of a user's profile
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub role: Option<Role>,
}

impl UserChanges {
    /// Validates raw profile fields into a change set
    pub fn new(
        name: Option<&str>,
        email: Option<&str>,
        role: Option<Role>,
    ) -> Result<Self, String> {
        Ok(Self {
            name: name.map(validate_name).transpose()?,
            email: email.map(Email::new).transpose()?,
            role,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }
}

/// Checks a plaintext password before it is hashed
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<String, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Please add a name".to_string());
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email::new("jane@devcamper.io").unwrap()
    }

    #[test]
    fn new_user_trims_name() {
        let user = NewUser::new("  Jane ", email(), Role::Publisher, "hash".into()).unwrap();

        assert_eq!(user.name, "Jane");
        assert_eq!(user.role, Role::Publisher);
    }

    #[test]
    fn blank_name_is_rejected() {
        let result = NewUser::new("   ", email(), Role::User, "hash".into());
        assert_eq!(result.unwrap_err(), "Please add a name");
    }

    #[test]
    fn password_length_is_enforced() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn changes_validate_email() {
        assert!(UserChanges::new(None, Some("bad"), None).is_err());

        let changes = UserChanges::new(Some("Bob"), Some("bob@x.io"), None).unwrap();
        assert_eq!(changes.name.as_deref(), Some("Bob"));
        assert!(!changes.is_empty());
        assert!(UserChanges::default().is_empty());
    }

    #[test]
    fn serialization_hides_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Jane".to_string(),
            email: email(),
            role: Role::User,
            password_hash: "secret-hash".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["email"], "jane@devcamper.io");
        assert_eq!(json["role"], "user");
        assert!(json.get("createdAt").is_some());
    }
}
