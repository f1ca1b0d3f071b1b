//! DevCamper API Library
//!
//! Bootcamp directory service: domain types, the list query builder,
//! Postgres adapters and the HTTP layer.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
