pub mod users;
pub mod courses;
pub mod completed;
pub mod media;
