use serde::Serialize;
use serde_json::Value;

use super::pagination::Pagination;
use super::params::ResourceQuery;
use super::populate::PopulateSpec;
use crate::domain::repositories::{FindOptions, RepositoryError, ResourceCollection};

/// A page of records plus links to the neighbouring pages
///
/// Serializes as `{success, count, pagination: {prev?, next?}, data}` where
/// `count` is the number of records on this page.
#[derive(Debug, Clone, Serialize)]
pub struct AdvancedResults<T = Value> {
    pub success: bool,
    pub count: usize,
    pub pagination: Pagination,
    pub data: Vec<T>,
}

/// Runs a list query against a collection
///
/// Issues one count over the *filtered* set and one page fetch. The count
/// drives `pagination.next`, so rows excluded by the filter never produce an
/// extra page.
///
/// # Arguments
/// * `collection` - Store adapter for the listed resource
/// * `query` - Parsed filter, projection, sort and page request
/// * `populate` - Optional expansion chosen by the route
///
/// # Errors
/// Returns the collection's error when the query references unknown fields or
/// the store fails.
pub async fn advanced_results<C>(
    collection: &C,
    query: &ResourceQuery,
    populate: Option<&PopulateSpec>,
) -> Result<AdvancedResults, RepositoryError>
where
    C: ResourceCollection + ?Sized,
{
    let total = collection.count(&query.filter).await?;

    let options = FindOptions {
        filter: &query.filter,
        projection: query.projection.as_ref(),
        sort: &query.sort,
        skip: query.page.skip(),
        take: query.page.take(),
        populate,
    };
    let data = collection.find(&options).await?;

    tracing::debug!(
        total,
        returned = data.len(),
        page = query.page.page(),
        limit = query.page.limit(),
        "advanced results"
    );

    Ok(AdvancedResults {
        success: true,
        count: data.len(),
        pagination: query.page.paginate(total),
        data,
    })
}
