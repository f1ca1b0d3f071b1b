use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::api::errors::ApiError;
use crate::api::handlers::{list_resources, parse_id, DataResponse};
use crate::api::middleware::{authorize, ensure_owner, AuthUser};
use crate::api::state::AppState;
use crate::domain::bootcamp::{Bootcamp, BootcampChanges, BootcampInput, BootcampPatch, NewBootcamp};
use crate::domain::query::{AdvancedResults, PopulateSpec};
use crate::domain::repositories::BootcampRepository;
use crate::domain::user::Role;
use crate::infrastructure::collections::{PostgresCollection, BOOTCAMPS};
use crate::infrastructure::repositories::PostgresBootcampRepository;

/// Publishers may own at most this many bootcamps
pub const MAX_BOOTCAMPS_PER_PUBLISHER: i64 = 1;

/// Loads a bootcamp or fails with a 404 naming the id
pub(crate) async fn find_bootcamp(
    repo: &PostgresBootcampRepository,
    raw_id: &str,
) -> Result<Bootcamp, ApiError> {
    let id = parse_id(raw_id)?;
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Bootcamp not found with id of {}", id)))
}

/// List bootcamps with filtering, projection, sorting and paging
///
/// GET /api/v1/bootcamps
pub async fn get_bootcamps(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<AdvancedResults>, ApiError> {
    let collection = PostgresCollection::new(state.pool.clone(), &BOOTCAMPS);
    let populate = PopulateSpec::path("courses");

    list_resources(&collection, &pairs, Some(&populate)).await
}

/// Get a bootcamp by ID
///
/// GET /api/v1/bootcamps/:id
pub async fn get_bootcamp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Bootcamp>>, ApiError> {
    let repo = PostgresBootcampRepository::new(state.pool.clone());
    let bootcamp = find_bootcamp(&repo, &id).await?;

    Ok(DataResponse::new(bootcamp))
}

/// Create a bootcamp owned by the caller
///
/// POST /api/v1/bootcamps
pub async fn create_bootcamp(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<BootcampInput>,
) -> Result<(StatusCode, Json<DataResponse<Bootcamp>>), ApiError> {
    authorize(&user, &[Role::Publisher, Role::Admin])?;

    let repo = PostgresBootcampRepository::new(state.pool.clone());

    if !user.is_admin() && repo.count_by_owner(user.id).await? >= MAX_BOOTCAMPS_PER_PUBLISHER {
        return Err(ApiError::bad_request(format!(
            "The user with ID {} has already published a bootcamp",
            user.id
        )));
    }

    let new_bootcamp = NewBootcamp::new(user.id, input).map_err(ApiError::bad_request)?;
    let bootcamp = repo.create(&new_bootcamp).await?;

    tracing::info!(bootcamp_id = %bootcamp.id, user_id = %user.id, "bootcamp created");
    Ok((StatusCode::CREATED, DataResponse::new(bootcamp)))
}

/// Update a bootcamp
///
/// PUT /api/v1/bootcamps/:id
pub async fn update_bootcamp(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(patch): Json<BootcampPatch>,
) -> Result<Json<DataResponse<Bootcamp>>, ApiError> {
    authorize(&user, &[Role::Publisher, Role::Admin])?;

    let repo = PostgresBootcampRepository::new(state.pool.clone());
    let bootcamp = find_bootcamp(&repo, &id).await?;
    ensure_owner(&user, bootcamp.user_id, "update this bootcamp")?;

    let changes = BootcampChanges::new(patch).map_err(ApiError::bad_request)?;
    let bootcamp = repo.update(bootcamp.id, &changes).await?;

    Ok(DataResponse::new(bootcamp))
}

/// Delete a bootcamp along with its courses and reviews
///
/// DELETE /api/v1/bootcamps/:id
pub async fn delete_bootcamp(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Value>>, ApiError> {
    authorize(&user, &[Role::Publisher, Role::Admin])?;

    let repo = PostgresBootcampRepository::new(state.pool.clone());
    let bootcamp = find_bootcamp(&repo, &id).await?;
    ensure_owner(&user, bootcamp.user_id, "delete this bootcamp")?;

    repo.delete(bootcamp.id).await?;

    tracing::info!(bootcamp_id = %bootcamp.id, user_id = %user.id, "bootcamp deleted");
    Ok(DataResponse::new(json!({})))
}
