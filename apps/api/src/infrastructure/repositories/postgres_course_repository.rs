use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::course::{Course, CourseChanges, NewCourse};
use crate::domain::repositories::{CourseRepository, RepositoryError};

/// PostgreSQL implementation of CourseRepository
pub struct PostgresCourseRepository {
    pool: PgPool,
}

impl PostgresCourseRepository {
    /// Creates a new PostgresCourseRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PostgresCourseRepository {
    async fn create(&self, course: &NewCourse) -> Result<Course, RepositoryError> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (
                id, bootcamp_id, user_id, title, description, weeks,
                tuition, minimum_skill, scholarship_available
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(course.id)
        .bind(course.bootcamp_id)
        .bind(course.user_id)
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.weeks)
        .bind(course.tuition)
        .bind(course.minimum_skill)
        .bind(course.scholarship_available)
        .fetch_one(&self.pool)
        .await?;

        Ok(course)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, RepositoryError> {
        let course = sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(course)
    }

    async fn find_by_bootcamp(&self, bootcamp_id: Uuid) -> Result<Vec<Course>, RepositoryError> {
        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT * FROM courses
            WHERE bootcamp_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(bootcamp_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(courses)
    }

    async fn update(&self, id: Uuid, changes: &CourseChanges) -> Result<Course, RepositoryError> {
        sqlx::query_as::<_, Course>(
            r#"
            UPDATE courses
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                weeks = COALESCE($4, weeks),
                tuition = COALESCE($5, tuition),
                minimum_skill = COALESCE($6, minimum_skill),
                scholarship_available = COALESCE($7, scholarship_available)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.weeks.as_deref())
        .bind(changes.tuition)
        .bind(changes.minimum_skill)
        .bind(changes.scholarship_available)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Course", id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("Course", id));
        }
        Ok(())
    }
}
