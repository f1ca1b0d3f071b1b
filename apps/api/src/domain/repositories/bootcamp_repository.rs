use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryError;
use crate::domain::bootcamp::{Bootcamp, BootcampChanges, NewBootcamp};

/// Repository trait for bootcamps
#[async_trait]
pub trait BootcampRepository: Send + Sync {
    /// Insert a new bootcamp
    async fn create(&self, bootcamp: &NewBootcamp) -> Result<Bootcamp, RepositoryError>;

    /// Find a bootcamp by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bootcamp>, RepositoryError>;

    /// Count the bootcamps owned by a user
    async fn count_by_owner(&self, user_id: Uuid) -> Result<i64, RepositoryError>;

    /// Apply a partial update, returning the stored bootcamp
    async fn update(
        &self,
        id: Uuid,
        changes: &BootcampChanges,
    ) -> Result<Bootcamp, RepositoryError>;

    /// Delete a bootcamp together with its courses and reviews
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    /// Recalculate `averageCost` from the bootcamp's courses
    async fn refresh_average_cost(&self, id: Uuid) -> Result<(), RepositoryError>;

    /// Recalculate `averageRating` from the bootcamp's reviews
    async fn refresh_average_rating(&self, id: Uuid) -> Result<(), RepositoryError>;
}
