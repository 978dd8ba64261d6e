pub mod completed_lessons;

pub use completed_lessons::*;
