// Infrastructure layer module
// Contains database adapters
// Follows Hexagonal Architecture

pub mod collections;
pub mod repositories;
