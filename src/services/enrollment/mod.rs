//! 수강 신청과 레슨 진도 서비스

pub mod enrollment_service;
pub mod completion_service;

pub use enrollment_service::EnrollmentService;
pub use completion_service::CompletionService;
