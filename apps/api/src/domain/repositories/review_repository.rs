use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryError;
use crate::domain::review::{NewReview, Review, ReviewChanges};

/// Repository trait for reviews
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a new review; a second review of the same bootcamp by the same
    /// user fails with [`RepositoryError::Duplicate`]
    async fn create(&self, review: &NewReview) -> Result<Review, RepositoryError>;

    /// Find a review by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, RepositoryError>;

    /// Find all reviews of a bootcamp, oldest first
    async fn find_by_bootcamp(&self, bootcamp_id: Uuid) -> Result<Vec<Review>, RepositoryError>;

    /// Apply a partial update, returning the stored review
    async fn update(&self, id: Uuid, changes: &ReviewChanges) -> Result<Review, RepositoryError>;

    /// Delete a review by ID
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
