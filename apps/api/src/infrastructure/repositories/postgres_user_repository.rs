use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::postgres_bootcamp_repository::{refresh_average_cost_with, refresh_average_rating_with};
use crate::domain::repositories::{RepositoryError, UserRepository};
use crate::domain::user::{Email, NewUser, Role, User, UserChanges};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    role: Role,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(row.email)
            .map_err(|e| RepositoryError::Database(format!("Invalid email from database: {}", e)))?;

        Ok(User {
            id: row.id,
            name: row.name,
            email,
            role: row.role,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, name, email, role, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, role, password_hash, created_at
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(user.role)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, role, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, role, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                role = COALESCE($4, role)
            WHERE id = $1
            RETURNING id, name, email, role, password_hash, created_at
            "#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.email.as_ref().map(Email::as_str))
        .bind(changes.role)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::not_found("User", id))?
        .try_into()
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("User", id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // the user's courses and reviews cascade, so their bootcamps need new averages
        let costed: Vec<Uuid> =
            sqlx::query_scalar("SELECT DISTINCT bootcamp_id FROM courses WHERE user_id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;
        let rated: Vec<Uuid> =
            sqlx::query_scalar("SELECT DISTINCT bootcamp_id FROM reviews WHERE user_id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("User", id));
        }

        // bootcamps the user owned are gone; their updates touch no rows
        for bootcamp_id in costed {
            refresh_average_cost_with(&mut *tx, bootcamp_id).await?;
        }
        for bootcamp_id in rated {
            refresh_average_rating_with(&mut *tx, bootcamp_id).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
