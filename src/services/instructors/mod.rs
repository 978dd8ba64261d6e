//! 강사 온보딩과 정산 서비스

pub mod instructor_service;

pub use instructor_service::InstructorService;
