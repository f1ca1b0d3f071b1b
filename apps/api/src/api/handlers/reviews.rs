use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::handlers::bootcamps::find_bootcamp;
use crate::api::handlers::{fetch_document, list_resources, parse_id, DataResponse, ListResponse};
use crate::api::middleware::{authorize, ensure_owner, AuthUser};
use crate::api::state::AppState;
use crate::domain::query::{AdvancedResults, PopulateSpec};
use crate::domain::repositories::{BootcampRepository, RepositoryError, ReviewRepository};
use crate::domain::review::{NewReview, Review, ReviewChanges, ReviewInput, ReviewPatch};
use crate::domain::user::Role;
use crate::infrastructure::collections::{PostgresCollection, REVIEWS};
use crate::infrastructure::repositories::{PostgresBootcampRepository, PostgresReviewRepository};

fn bootcamp_summary() -> PopulateSpec {
    PopulateSpec::path("bootcamp").select(&["name", "description"])
}

async fn find_review(repo: &PostgresReviewRepository, raw_id: &str) -> Result<Review, ApiError> {
    let id = parse_id(raw_id)?;
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No review with the id of {}", id)))
}

async fn refresh_average_rating(state: &AppState, bootcamp_id: Uuid) -> Result<(), ApiError> {
    PostgresBootcampRepository::new(state.pool.clone())
        .refresh_average_rating(bootcamp_id)
        .await?;
    Ok(())
}

/// List reviews, each with its bootcamp's name and description
///
/// GET /api/v1/reviews
pub async fn get_reviews(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<AdvancedResults>, ApiError> {
    let collection = PostgresCollection::new(state.pool.clone(), &REVIEWS);
    list_resources(&collection, &pairs, Some(&bootcamp_summary())).await
}

/// List every review of one bootcamp
///
/// GET /api/v1/bootcamps/:id/reviews
pub async fn get_bootcamp_reviews(
    State(state): State<AppState>,
    Path(bootcamp_id): Path<String>,
) -> Result<Json<ListResponse<Review>>, ApiError> {
    let bootcamp_id = parse_id(&bootcamp_id)?;
    let reviews = PostgresReviewRepository::new(state.pool.clone())
        .find_by_bootcamp(bootcamp_id)
        .await?;

    Ok(ListResponse::new(reviews))
}

/// Get a review by ID with its bootcamp populated
///
/// GET /api/v1/reviews/:id
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Value>>, ApiError> {
    let id = parse_id(&id)?;
    let collection = PostgresCollection::new(state.pool.clone(), &REVIEWS);

    let review = fetch_document(&collection, id, Some(&bootcamp_summary()))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No review found with the id of {}", id)))?;

    Ok(DataResponse::new(review))
}

/// Review a bootcamp; each user may review a bootcamp once
///
/// POST /api/v1/bootcamps/:id/reviews
pub async fn create_review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(bootcamp_id): Path<String>,
    Json(input): Json<ReviewInput>,
) -> Result<(StatusCode, Json<DataResponse<Review>>), ApiError> {
    authorize(&user, &[Role::User, Role::Admin])?;

    let bootcamps = PostgresBootcampRepository::new(state.pool.clone());
    let bootcamp = find_bootcamp(&bootcamps, &bootcamp_id).await?;

    let new_review = NewReview::new(bootcamp.id, user.id, input).map_err(ApiError::bad_request)?;
    let review = PostgresReviewRepository::new(state.pool.clone())
        .create(&new_review)
        .await
        .map_err(|error| match error {
            RepositoryError::Duplicate => {
                ApiError::bad_request("You have already reviewed this bootcamp")
            }
            other => other.into(),
        })?;
    refresh_average_rating(&state, review.bootcamp_id).await?;

    tracing::info!(review_id = %review.id, bootcamp_id = %review.bootcamp_id, "review created");
    Ok((StatusCode::CREATED, DataResponse::new(review)))
}

/// Update a review
///
/// PUT /api/v1/reviews/:id
pub async fn update_review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(patch): Json<ReviewPatch>,
) -> Result<Json<DataResponse<Review>>, ApiError> {
    let repo = PostgresReviewRepository::new(state.pool.clone());
    let review = find_review(&repo, &id).await?;
    ensure_owner(&user, review.user_id, "update this review")?;

    let changes = ReviewChanges::new(patch).map_err(ApiError::bad_request)?;
    let review = repo.update(review.id, &changes).await?;
    refresh_average_rating(&state, review.bootcamp_id).await?;

    Ok(DataResponse::new(review))
}

/// Delete a review
///
/// DELETE /api/v1/reviews/:id
pub async fn delete_review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Value>>, ApiError> {
    let repo = PostgresReviewRepository::new(state.pool.clone());
    let review = find_review(&repo, &id).await?;
    ensure_owner(&user, review.user_id, "delete this review")?;

    repo.delete(review.id).await?;
    refresh_average_rating(&state, review.bootcamp_id).await?;

    Ok(DataResponse::new(json!({})))
}
