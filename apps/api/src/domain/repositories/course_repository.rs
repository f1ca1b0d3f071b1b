use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryError;
use crate::domain::course::{Course, CourseChanges, NewCourse};

/// Repository trait for courses
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert a new course
    async fn create(&self, course: &NewCourse) -> Result<Course, RepositoryError>;

    /// Find a course by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, RepositoryError>;

    /// Find all courses of a bootcamp, oldest first
    async fn find_by_bootcamp(&self, bootcamp_id: Uuid) -> Result<Vec<Course>, RepositoryError>;

    /// Apply a partial update, returning the stored course
    async fn update(&self, id: Uuid, changes: &CourseChanges) -> Result<Course, RepositoryError>;

    /// Delete a course by ID
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
