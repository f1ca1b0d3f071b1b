// Review domain module

#![allow(clippy::module_inception)]

pub mod review;

pub use review::{NewReview, Rating, Review, ReviewChanges, ReviewInput, ReviewPatch};
