use thiserror::Error;
use uuid::Uuid;

use crate::domain::query::QueryError;

/// Postgres SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// Errors returned by repositories and collections
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{entity} not found with id of {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Duplicate value entered")]
    Duplicate,

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        let unique_violation = error
            .as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| code == UNIQUE_VIOLATION);

        if unique_violation {
            RepositoryError::Duplicate
        } else {
            RepositoryError::Database(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let id = Uuid::nil();
        let error = RepositoryError::not_found("Bootcamp", id);

        assert_eq!(
            error.to_string(),
            format!("Bootcamp not found with id of {}", id)
        );
    }

    #[test]
    fn query_errors_keep_their_message() {
        let error = RepositoryError::from(QueryError::UnknownField("nope".to_string()));
        assert_eq!(error.to_string(), "Unknown field: nope");
    }

    #[test]
    fn non_database_sqlx_errors_are_generic() {
        let error = RepositoryError::from(sqlx::Error::RowNotFound);
        assert!(matches!(error, RepositoryError::Database(_)));
    }
}
