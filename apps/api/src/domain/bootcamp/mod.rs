// Bootcamp domain module
// Contains the bootcamp entity, its input types and value objects

#![allow(clippy::module_inception)]

pub mod bootcamp;
pub mod value_objects;

pub use bootcamp::{Bootcamp, BootcampChanges, BootcampInput, BootcampPatch, NewBootcamp};
pub use value_objects::{slugify, Career};
