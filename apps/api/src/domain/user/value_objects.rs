use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Email value object representing a valid email address
///
/// # Invariants
/// - Exactly one '@' with a non-empty local part
/// - Domain contains a '.' that is neither first nor last
/// - No whitespace
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Creates a new Email value object
    ///
    /// # Example
    /// ```
    /// use devcamper_api::domain::user::Email;
    ///
    /// let email = Email::new("john@gmail.com").expect("valid email");
    /// assert_eq!(email.as_str(), "john@gmail.com");
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, String> {
        let email = email.into().trim().to_lowercase();
        if Self::is_valid(&email) {
            Ok(Email(email))
        } else {
            Err(format!("Please add a valid email: {}", email))
        }
    }

    fn is_valid(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain
                        .rsplit_once('.')
                        .is_some_and(|(host, tld)| !host.is_empty() && tld.len() >= 2)
                    && !domain.starts_with('.')
            }
            None => false,
        }
    }

    /// Returns the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

/// Access role of a user
///
/// `admin` cannot be chosen through registration or the user API; it is
/// granted directly in the database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Publisher,
    Admin,
}

impl Role {
    /// Parses a role that a client is allowed to request
    ///
    /// # Example
    /// ```
    /// use devcamper_api::domain::user::Role;
    ///
    /// assert_eq!(Role::assignable("publisher"), Ok(Role::Publisher));
    /// assert!(Role::assignable("admin").is_err());
    /// ```
    pub fn assignable(value: &str) -> Result<Self, String> {
        match value.parse::<Role>()? {
            Role::Admin => Err("Role admin cannot be assigned".to_string()),
            role => Ok(role),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Role::User),
            "publisher" => Ok(Role::Publisher),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Publisher => write!(f, "publisher"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email() {
        assert!(Email::new("test@example.com").is_ok());
    }

    #[test]
    fn valid_email_with_subdomain() {
        assert!(Email::new("user@mail.example.com").is_ok());
    }

    #[test]
    fn email_is_normalized() {
        let email = Email::new("  John@Gmail.COM ").unwrap();
        assert_eq!(email.as_str(), "john@gmail.com");
    }

    #[test]
    fn invalid_emails() {
        for raw in ["", "invalid", "a@", "@b.com", "a@b", "a@.com", "a@b.c", "a b@c.com", "a@b@c.com"] {
            assert!(Email::new(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn email_display() {
        let email = Email::new("test@example.com").unwrap();
        assert_eq!(format!("{}", email), "test@example.com");
    }

    #[test]
    fn email_deserialization_validates() {
        let ok: Result<Email, _> = serde_json::from_str("\"a@b.io\"");
        let bad: Result<Email, _> = serde_json::from_str("\"nope\"");

        assert!(ok.is_ok());
        assert!(bad.is_err());
    }

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::User, Role::Publisher, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn admin_is_not_assignable() {
        assert_eq!(Role::assignable("user"), Ok(Role::User));
        assert!(Role::assignable("admin").is_err());
        assert!(Role::assignable("owner").is_err());
    }

    #[test]
    fn default_role_is_user() {
        assert_eq!(Role::default(), Role::User);
    }
}
