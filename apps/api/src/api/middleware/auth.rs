use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::auth::JwtSettings;
use crate::domain::repositories::UserRepository;
use crate::domain::user::{Role, User};
use crate::infrastructure::repositories::PostgresUserRepository;

pub const NOT_AUTHORIZED: &str = "Not authorized to access this route";

/// Authenticated user extractor for protected routes
///
/// Reads `Authorization: Bearer <token>`, verifies it and loads the user the
/// token was issued to. Any failure is a 401.
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(AuthUser(user): AuthUser) -> Result<String, ApiError> {
///     Ok(format!("Hello {}", user.name))
/// }
/// ```
pub struct AuthUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    PgPool: FromRef<S>,
    JwtSettings: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| ApiError::unauthorized(NOT_AUTHORIZED))?;

        let claims = JwtSettings::from_ref(state).verify(token).map_err(|e| {
            tracing::debug!(error = %e, "rejected token");
            ApiError::unauthorized(NOT_AUTHORIZED)
        })?;

        let user = PostgresUserRepository::new(PgPool::from_ref(state))
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| ApiError::unauthorized(NOT_AUTHORIZED))?;

        Ok(AuthUser(user))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects users whose role is not in `roles` with a 403
pub fn authorize(user: &User, roles: &[Role]) -> Result<(), ApiError> {
    if roles.contains(&user.role) {
        Ok(())
    } else {
        Err(ApiError::forbidden(format!(
            "User role {} is not authorized to access this route",
            user.role
        )))
    }
}

/// Rejects anyone but the resource owner or an admin with a 401
pub fn ensure_owner(user: &User, owner_id: Uuid, action: &str) -> Result<(), ApiError> {
    if user.id == owner_id || user.is_admin() {
        Ok(())
    } else {
        Err(ApiError::unauthorized(format!(
            "User {} is not authorized to {}",
            user.id, action
        )))
    }
}
