// Repository ports
// Implemented by adapters in the infrastructure layer

pub mod bootcamp_repository;
pub mod collection;
pub mod course_repository;
pub mod errors;
pub mod review_repository;
pub mod user_repository;

pub use bootcamp_repository::BootcampRepository;
pub use collection::{FindOptions, ResourceCollection};
pub use course_repository::CourseRepository;
pub use errors::RepositoryError;
pub use review_repository::ReviewRepository;
pub use user_repository::UserRepository;
