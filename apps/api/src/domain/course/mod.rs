// Course domain module

#![allow(clippy::module_inception)]

pub mod course;

pub use course::{Course, CourseChanges, CourseInput, CoursePatch, MinimumSkill, NewCourse};
