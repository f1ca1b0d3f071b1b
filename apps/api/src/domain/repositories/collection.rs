use async_trait::async_trait;
use serde_json::Value;

use super::errors::RepositoryError;
use crate::domain::query::{FilterSpec, PopulateSpec, Projection, SortSpec};

/// Everything a collection needs to fetch one page of records
#[derive(Debug, Clone, Copy)]
pub struct FindOptions<'a> {
    pub filter: &'a FilterSpec,
    pub projection: Option<&'a Projection>,
    pub sort: &'a SortSpec,
    pub skip: u64,
    pub take: u64,
    pub populate: Option<&'a PopulateSpec>,
}

/// Read-side port used by the paginator
///
/// Records are returned as JSON documents so one implementation can serve
/// every resource; field names are the public (camelCase) names.
#[async_trait]
pub trait ResourceCollection: Send + Sync {
    /// Counts the records matching `filter`
    async fn count(&self, filter: &FilterSpec) -> Result<u64, RepositoryError>;

    /// Fetches a filtered, sorted, projected window of records
    async fn find(&self, options: &FindOptions<'_>) -> Result<Vec<Value>, RepositoryError>;
}
