//! Courses Entity Module

pub mod course;

pub use course::*;
