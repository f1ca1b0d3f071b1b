// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of transport concerns

pub mod bootcamp;
pub mod course;
pub mod query;
pub mod repositories;
pub mod review;
pub mod timestamp;
pub mod user;
