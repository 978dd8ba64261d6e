//! 비즈니스 로직 서비스
//!
//! 모든 서비스는 `instance()`로 얻는 싱글톤이며 `inventory`로 등록되어
//! 시작 시 `ServiceLocator::initialize_all()`에서 초기화됩니다.

pub mod auth;
pub mod users;
pub mod courses;
pub mod enrollment;
pub mod instructors;
pub mod integrations;
