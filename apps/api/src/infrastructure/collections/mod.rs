// Read-side adapters for the list endpoints

pub mod in_memory_collection;
pub mod postgres_collection;
pub mod schema;

pub use in_memory_collection::InMemoryCollection;
pub use postgres_collection::PostgresCollection;
pub use schema::{FieldDef, FieldKind, Relation, ResourceSchema, BOOTCAMPS, COURSES, REVIEWS, USERS};
