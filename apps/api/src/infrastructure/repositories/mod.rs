// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod postgres_bootcamp_repository;
pub mod postgres_course_repository;
pub mod postgres_review_repository;
pub mod postgres_user_repository;

pub use postgres_bootcamp_repository::PostgresBootcampRepository;
pub use postgres_course_repository::PostgresCourseRepository;
pub use postgres_review_repository::PostgresReviewRepository;
pub use postgres_user_repository::PostgresUserRepository;
