// Admin-only user management

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::errors::ApiError;
use crate::api::handlers::{list_resources, parse_id, DataResponse};
use crate::api::middleware::{authorize, AuthUser};
use crate::api::state::AppState;
use crate::auth::hash_password;
use crate::domain::query::AdvancedResults;
use crate::domain::repositories::{RepositoryError, UserRepository};
use crate::domain::user::{Email, NewUser, Role, User, UserChanges};
use crate::infrastructure::collections::{PostgresCollection, USERS};
use crate::infrastructure::repositories::PostgresUserRepository;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

fn admin_only(user: &User) -> Result<(), ApiError> {
    authorize(user, &[Role::Admin])
}

fn user_not_found(error: RepositoryError) -> ApiError {
    match error {
        RepositoryError::NotFound { id, .. } => {
            ApiError::not_found(format!("No user with the id of {}", id))
        }
        other => other.into(),
    }
}

/// GET /api/v1/users
pub async fn get_users(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<AdvancedResults>, ApiError> {
    admin_only(&user)?;

    let collection = PostgresCollection::new(state.pool.clone(), &USERS);
    list_resources(&collection, &pairs, None).await
}

/// GET /api/v1/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<User>>, ApiError> {
    admin_only(&user)?;

    let id = parse_id(&id)?;
    let found = PostgresUserRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No user with the id of {}", id)))?;

    Ok(DataResponse::new(found))
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<DataResponse<User>>), ApiError> {
    admin_only(&user)?;

    let email = Email::new(&req.email).map_err(ApiError::bad_request)?;
    let password_hash = hash_password(&req.password)?;
    let new_user =
        NewUser::new(&req.name, email, req.role, password_hash).map_err(ApiError::bad_request)?;

    let created = PostgresUserRepository::new(state.pool.clone())
        .create(&new_user)
        .await?;

    tracing::info!(user_id = %created.id, admin_id = %user.id, "user created by admin");
    Ok((StatusCode::CREATED, DataResponse::new(created)))
}

/// PUT /api/v1/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<DataResponse<User>>, ApiError> {
    admin_only(&user)?;

    let id = parse_id(&id)?;
    let changes = UserChanges::new(req.name.as_deref(), req.email.as_deref(), req.role)
        .map_err(ApiError::bad_request)?;

    let updated = PostgresUserRepository::new(state.pool.clone())
        .update(id, &changes)
        .await
        .map_err(user_not_found)?;

    Ok(DataResponse::new(updated))
}

/// DELETE /api/v1/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Value>>, ApiError> {
    admin_only(&user)?;

    let id = parse_id(&id)?;
    PostgresUserRepository::new(state.pool.clone())
        .delete(id)
        .await
        .map_err(user_not_found)?;

    tracing::info!(user_id = %id, admin_id = %user.id, "user deleted");
    Ok(DataResponse::new(json!({})))
}
