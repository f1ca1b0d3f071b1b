use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::domain::bootcamp::{Bootcamp, BootcampChanges, Career, NewBootcamp};
use crate::domain::repositories::{BootcampRepository, RepositoryError};

#[derive(sqlx::FromRow)]
struct BootcampRow {
    id: Uuid,
    name: String,
    slug: String,
    description: String,
    website: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    address: String,
    careers: Vec<String>,
    average_rating: Option<f64>,
    average_cost: Option<i32>,
    photo: String,
    housing: bool,
    job_assistance: bool,
    job_guarantee: bool,
    accept_gi: bool,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<BootcampRow> for Bootcamp {
    type Error = RepositoryError;

    fn try_from(row: BootcampRow) -> Result<Self, Self::Error> {
        let careers = row
            .careers
            .iter()
            .map(|career| career.parse::<Career>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RepositoryError::Database(format!("Invalid career from database: {}", e)))?;

        Ok(Bootcamp {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            website: row.website,
            phone: row.phone,
            email: row.email,
            address: row.address,
            careers,
            average_rating: row.average_rating,
            average_cost: row.average_cost,
            photo: row.photo,
            housing: row.housing,
            job_assistance: row.job_assistance,
            job_guarantee: row.job_guarantee,
            accept_gi: row.accept_gi,
            user_id: row.user_id,
            created_at: row.created_at,
        })
    }
}

fn career_names(careers: &[Career]) -> Vec<String> {
    careers.iter().map(|career| career.as_str().to_string()).collect()
}

/// Sets `average_cost` to the rounded-up mean tuition, or NULL without courses
///
/// Takes any executor so a caller can run it inside its own transaction.
pub(crate) async fn refresh_average_cost_with<'e, E>(
    executor: E,
    id: Uuid,
) -> Result<(), RepositoryError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        UPDATE bootcamps
        SET average_cost = (
            SELECT CEIL(AVG(tuition))::INTEGER FROM courses WHERE bootcamp_id = $1
        )
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    tracing::debug!(bootcamp_id = %id, "average cost refreshed");
    Ok(())
}

/// Sets `average_rating` to the mean review rating, or NULL without reviews
pub(crate) async fn refresh_average_rating_with<'e, E>(
    executor: E,
    id: Uuid,
) -> Result<(), RepositoryError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        UPDATE bootcamps
        SET average_rating = (
            SELECT AVG(rating)::DOUBLE PRECISION FROM reviews WHERE bootcamp_id = $1
        )
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    tracing::debug!(bootcamp_id = %id, "average rating refreshed");
    Ok(())
}

/// PostgreSQL implementation of BootcampRepository
pub struct PostgresBootcampRepository {
    pool: PgPool,
}

impl PostgresBootcampRepository {
    /// Creates a new PostgresBootcampRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BootcampRepository for PostgresBootcampRepository {
    async fn create(&self, bootcamp: &NewBootcamp) -> Result<Bootcamp, RepositoryError> {
        sqlx::query_as::<_, BootcampRow>(
            r#"
            INSERT INTO bootcamps (
                id, user_id, name, slug, description, website, phone, email,
                address, careers, housing, job_assistance, job_guarantee, accept_gi
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(bootcamp.id)
        .bind(bootcamp.user_id)
        .bind(&bootcamp.name)
        .bind(&bootcamp.slug)
        .bind(&bootcamp.description)
        .bind(bootcamp.website.as_deref())
        .bind(bootcamp.phone.as_deref())
        .bind(bootcamp.email.as_deref())
        .bind(&bootcamp.address)
        .bind(career_names(&bootcamp.careers))
        .bind(bootcamp.housing)
        .bind(bootcamp.job_assistance)
        .bind(bootcamp.job_guarantee)
        .bind(bootcamp.accept_gi)
        .fetch_one(&self.pool)
        .await?
        .try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bootcamp>, RepositoryError> {
        sqlx::query_as::<_, BootcampRow>("SELECT * FROM bootcamps WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Bootcamp::try_from)
            .transpose()
    }

    async fn count_by_owner(&self, user_id: Uuid) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bootcamps WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &BootcampChanges,
    ) -> Result<Bootcamp, RepositoryError> {
        sqlx::query_as::<_, BootcampRow>(
            r#"
            UPDATE bootcamps
            SET name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                website = COALESCE($5, website),
                phone = COALESCE($6, phone),
                email = COALESCE($7, email),
                address = COALESCE($8, address),
                careers = COALESCE($9, careers),
                housing = COALESCE($10, housing),
                job_assistance = COALESCE($11, job_assistance),
                job_guarantee = COALESCE($12, job_guarantee),
                accept_gi = COALESCE($13, accept_gi)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.slug.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.website.as_deref())
        .bind(changes.phone.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.address.as_deref())
        .bind(changes.careers.as_deref().map(career_names))
        .bind(changes.housing)
        .bind(changes.job_assistance)
        .bind(changes.job_guarantee)
        .bind(changes.accept_gi)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Bootcamp", id))?
        .try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        // courses and reviews go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM bootcamps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("Bootcamp", id));
        }
        Ok(())
    }

    async fn refresh_average_cost(&self, id: Uuid) -> Result<(), RepositoryError> {
        refresh_average_cost_with(&self.pool, id).await
    }

    async fn refresh_average_rating(&self, id: Uuid) -> Result<(), RepositoryError> {
        refresh_average_rating_with(&self.pool, id).await
    }
}
