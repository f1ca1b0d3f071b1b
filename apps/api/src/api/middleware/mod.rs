// Request guards: authentication and authorization

pub mod auth;

pub use auth::{authorize, ensure_owner, AuthUser};
