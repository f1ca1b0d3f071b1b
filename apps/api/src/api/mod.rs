// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use handlers::{auth, bootcamps, courses, reviews, users};
pub use state::AppState;

/// Mount point of the versioned API
pub const API_PREFIX: &str = "/api/v1";

/// Builds the application router
pub fn router(state: AppState) -> Router {
    let v1 = Router::new()
        // Auth routes
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", get(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/auth/updatedetails", put(auth::update_details))
        .route("/auth/updatepassword", put(auth::update_password))
        // Bootcamp routes
        .route(
            "/bootcamps",
            get(bootcamps::get_bootcamps).post(bootcamps::create_bootcamp),
        )
        .route(
            "/bootcamps/:id",
            get(bootcamps::get_bootcamp)
                .put(bootcamps::update_bootcamp)
                .delete(bootcamps::delete_bootcamp),
        )
        .route(
            "/bootcamps/:id/courses",
            get(courses::get_bootcamp_courses).post(courses::create_course),
        )
        .route(
            "/bootcamps/:id/reviews",
            get(reviews::get_bootcamp_reviews).post(reviews::create_review),
        )
        // Course routes
        .route("/courses", get(courses::get_courses))
        .route(
            "/courses/:id",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        // Review routes
        .route("/reviews", get(reviews::get_reviews))
        .route(
            "/reviews/:id",
            get(reviews::get_review)
                .put(reviews::update_review)
                .delete(reviews::delete_review),
        )
        // User routes (admin)
        .route("/users", get(users::get_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    Router::new()
        .route("/health", get(auth::health_check))
        .nest(API_PREFIX, v1)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
