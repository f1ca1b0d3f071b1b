use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryError;
use crate::domain::user::{Email, NewUser, User, UserChanges};

/// Repository trait for users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user; an existing email fails with [`RepositoryError::Duplicate`]
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Apply a partial profile update, returning the stored user
    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<User, RepositoryError>;

    /// Replace a user's password hash
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), RepositoryError>;

    /// Delete a user by ID
    ///
    /// Their bootcamps, courses and reviews go with them. Bootcamps that lose
    /// a course or review get their averages recalculated in the same
    /// transaction.
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
