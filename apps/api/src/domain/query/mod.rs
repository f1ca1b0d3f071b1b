// Query builder for list endpoints
// Turns query-string pairs into a typed filter, projection, sort and page request

pub mod errors;
pub mod filter;
pub mod pagination;
pub mod params;
pub mod populate;
pub mod projection;
pub mod results;
pub mod sort;

pub use errors::QueryError;
pub use filter::{Condition, FieldFilter, FilterSpec};
pub use pagination::{PageLink, PageRequest, Pagination};
pub use params::ResourceQuery;
pub use populate::PopulateSpec;
pub use projection::Projection;
pub use results::{advanced_results, AdvancedResults};
pub use sort::{SortDirection, SortKey, SortSpec};
