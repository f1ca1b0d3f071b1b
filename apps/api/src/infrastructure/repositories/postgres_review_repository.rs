use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::repositories::{RepositoryError, ReviewRepository};
use crate::domain::review::{NewReview, Rating, Review, ReviewChanges};

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    title: String,
    text: String,
    rating: i32,
    bootcamp_id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = RepositoryError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let rating = Rating::new(row.rating)
            .map_err(|e| RepositoryError::Database(format!("Invalid rating from database: {}", e)))?;

        Ok(Review {
            id: row.id,
            title: row.title,
            text: row.text,
            rating,
            bootcamp_id: row.bootcamp_id,
            user_id: row.user_id,
            created_at: row.created_at,
        })
    }
}

/// PostgreSQL implementation of ReviewRepository
pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    /// Creates a new PostgresReviewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn create(&self, review: &NewReview) -> Result<Review, RepositoryError> {
        sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO reviews (id, bootcamp_id, user_id, title, text, rating)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(review.id)
        .bind(review.bootcamp_id)
        .bind(review.user_id)
        .bind(&review.title)
        .bind(&review.text)
        .bind(review.rating.value())
        .fetch_one(&self.pool)
        .await?
        .try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, RepositoryError> {
        sqlx::query_as::<_, ReviewRow>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Review::try_from)
            .transpose()
    }

    async fn find_by_bootcamp(&self, bootcamp_id: Uuid) -> Result<Vec<Review>, RepositoryError> {
        sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT * FROM reviews
            WHERE bootcamp_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(bootcamp_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Review::try_from)
        .collect()
    }

    async fn update(&self, id: Uuid, changes: &ReviewChanges) -> Result<Review, RepositoryError> {
        sqlx::query_as::<_, ReviewRow>(
            r#"
            UPDATE reviews
            SET title = COALESCE($2, title),
                text = COALESCE($3, text),
                rating = COALESCE($4, rating)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.text.as_deref())
        .bind(changes.rating.map(|rating| rating.value()))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Review", id))?
        .try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("Review", id));
        }
        Ok(())
    }
}
