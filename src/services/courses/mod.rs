//! 강의 서비스: 강의/레슨 작성과 미디어 업로드

pub mod course_service;
pub mod media_service;

pub use course_service::CourseService;
pub use media_service::MediaService;
