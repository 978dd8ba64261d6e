//! # Data Transfer Objects (DTO) Module
//!
//! HTTP 요청 본문(`validator`로 검증)과 응답 본문 구조체를 정의합니다.
//! 응답 DTO는 ObjectId와 날짜를 문자열로 내보냅니다.

pub mod users;
pub mod courses;
pub mod enrollment;
pub mod instructors;

pub use users::*;
pub use courses::*;
pub use enrollment::*;
pub use instructors::*;
