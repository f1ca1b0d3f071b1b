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
use crate::domain::course::{Course, CourseChanges, CourseInput, CoursePatch, NewCourse};
use crate::domain::query::{AdvancedResults, PopulateSpec};
use crate::domain::repositories::{BootcampRepository, CourseRepository};
use crate::domain::user::Role;
use crate::infrastructure::collections::{PostgresCollection, COURSES};
use crate::infrastructure::repositories::{PostgresBootcampRepository, PostgresCourseRepository};

fn bootcamp_summary() -> PopulateSpec {
    PopulateSpec::path("bootcamp").select(&["name", "description"])
}

async fn find_course(repo: &PostgresCourseRepository, raw_id: &str) -> Result<Course, ApiError> {
    let id = parse_id(raw_id)?;
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No course with the id of {}", id)))
}

async fn refresh_average_cost(state: &AppState, bootcamp_id: Uuid) -> Result<(), ApiError> {
    PostgresBootcampRepository::new(state.pool.clone())
        .refresh_average_cost(bootcamp_id)
        .await?;
    Ok(())
}

/// List courses, each with its bootcamp's name and description
///
/// GET /api/v1/courses
pub async fn get_courses(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<AdvancedResults>, ApiError> {
    let collection = PostgresCollection::new(state.pool.clone(), &COURSES);
    list_resources(&collection, &pairs, Some(&bootcamp_summary())).await
}

/// List every course of one bootcamp
///
/// GET /api/v1/bootcamps/:id/courses
pub async fn get_bootcamp_courses(
    State(state): State<AppState>,
    Path(bootcamp_id): Path<String>,
) -> Result<Json<ListResponse<Course>>, ApiError> {
    let bootcamp_id = parse_id(&bootcamp_id)?;
    let courses = PostgresCourseRepository::new(state.pool.clone())
        .find_by_bootcamp(bootcamp_id)
        .await?;

    Ok(ListResponse::new(courses))
}

/// Get a course by ID with its bootcamp populated
///
/// GET /api/v1/courses/:id
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Value>>, ApiError> {
    let id = parse_id(&id)?;
    let collection = PostgresCollection::new(state.pool.clone(), &COURSES);

    let course = fetch_document(&collection, id, Some(&bootcamp_summary()))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No course with the id of {}", id)))?;

    Ok(DataResponse::new(course))
}

/// Add a course to a bootcamp the caller owns
///
/// POST /api/v1/bootcamps/:id/courses
pub async fn create_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(bootcamp_id): Path<String>,
    Json(input): Json<CourseInput>,
) -> Result<(StatusCode, Json<DataResponse<Course>>), ApiError> {
    authorize(&user, &[Role::Publisher, Role::Admin])?;

    let bootcamps = PostgresBootcampRepository::new(state.pool.clone());
    let bootcamp = find_bootcamp(&bootcamps, &bootcamp_id).await?;
    ensure_owner(
        &user,
        bootcamp.user_id,
        &format!("add a course to bootcamp {}", bootcamp.id),
    )?;

    let new_course = NewCourse::new(bootcamp.id, user.id, input).map_err(ApiError::bad_request)?;
    let course = PostgresCourseRepository::new(state.pool.clone())
        .create(&new_course)
        .await?;
    refresh_average_cost(&state, course.bootcamp_id).await?;

    tracing::info!(course_id = %course.id, bootcamp_id = %course.bootcamp_id, "course created");
    Ok((StatusCode::CREATED, DataResponse::new(course)))
}

/// Update a course
///
/// PUT /api/v1/courses/:id
pub async fn update_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(patch): Json<CoursePatch>,
) -> Result<Json<DataResponse<Course>>, ApiError> {
    authorize(&user, &[Role::Publisher, Role::Admin])?;

    let repo = PostgresCourseRepository::new(state.pool.clone());
    let course = find_course(&repo, &id).await?;
    ensure_owner(&user, course.user_id, &format!("update course {}", course.id))?;

    let changes = CourseChanges::new(patch).map_err(ApiError::bad_request)?;
    let course = repo.update(course.id, &changes).await?;
    refresh_average_cost(&state, course.bootcamp_id).await?;

    Ok(DataResponse::new(course))
}

/// Delete a course
///
/// DELETE /api/v1/courses/:id
pub async fn delete_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Value>>, ApiError> {
    authorize(&user, &[Role::Publisher, Role::Admin])?;

    let repo = PostgresCourseRepository::new(state.pool.clone());
    let course = find_course(&repo, &id).await?;
    ensure_owner(&user, course.user_id, &format!("delete course {}", course.id))?;

    repo.delete(course.id).await?;
    refresh_average_cost(&state, course.bootcamp_id).await?;

    Ok(DataResponse::new(json!({})))
}
