// HTTP handlers, one module per resource

pub mod auth;
pub mod bootcamps;
pub mod courses;
pub mod reviews;
pub mod users;

use axum::Json;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::domain::query::{
    advanced_results, AdvancedResults, Condition, FilterSpec, PopulateSpec, ResourceQuery,
    SortSpec,
};
use crate::domain::repositories::{FindOptions, ResourceCollection};

/// `{success: true, data}` envelope
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// `{success: true, count, data}` envelope for unpaginated lists
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Json<Self> {
        Json(Self {
            success: true,
            count: data.len(),
            data,
        })
    }
}

/// Parses an id taken from the path; anything malformed is a 404
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found("Resource not found"))
}

/// Serves a list endpoint from raw query-string pairs
pub async fn list_resources(
    collection: &dyn ResourceCollection,
    pairs: &[(String, String)],
    populate: Option<&PopulateSpec>,
) -> Result<Json<AdvancedResults>, ApiError> {
    let query = ResourceQuery::from_pairs(pairs)?;
    let results = advanced_results(collection, &query, populate).await?;
    Ok(Json(results))
}

/// Fetches one record as a document, e.g. a course with its bootcamp populated
pub async fn fetch_document(
    collection: &dyn ResourceCollection,
    id: Uuid,
    populate: Option<&PopulateSpec>,
) -> Result<Option<Value>, ApiError> {
    let filter = FilterSpec::new().with("id", Condition::Equals(id.to_string()));
    let sort = SortSpec::default();
    let options = FindOptions {
        filter: &filter,
        projection: None,
        sort: &sort,
        skip: 0,
        take: 1,
        populate,
    };

    let mut documents = collection.find(&options).await?;
    Ok(documents.pop())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn malformed_id_is_not_found() {
        let error = parse_id("5d713995b721c3bb38c1f5d0").unwrap_err();

        assert_eq!(error.status, StatusCode::NOT_FOUND);
        assert_eq!(error.message, "Resource not found");
        assert!(parse_id("67e55044-10b1-426f-9247-bb680e5fe0c8").is_ok());
    }

    #[test]
    fn list_envelope_counts_items() {
        let Json(body) = ListResponse::new(vec![1, 2, 3]);
        assert_eq!(body.count, 3);
        assert!(body.success);
    }
}
