// User domain module
// Contains the user entity and its value objects

#![allow(clippy::module_inception)]

pub mod user;
pub mod value_objects;

pub use user::{validate_password, NewUser, User, UserChanges, MIN_PASSWORD_LENGTH};
pub use value_objects::{Email, Role};
