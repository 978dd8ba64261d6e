//! 레슨 완료 기록 데이터 액세스 계층

pub mod completed_repo;

pub use completed_repo::CompletedRepository;
