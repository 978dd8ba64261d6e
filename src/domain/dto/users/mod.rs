//! # User Data Transfer Objects Module
//!
//! 회원가입, 로그인, 비밀번호 재설정 요청과 사용자 응답 구조를 정의합니다.
//!
//! ```text
//! users/
//! ├── request/
//! │   ├── create_user_request.rs   # 회원가입
//! │   ├── auth_request.rs          # 로그인
//! │   └── password_request.rs      # 비밀번호 찾기/재설정
//! └── response/
//!     └── user_response.rs         # 비밀번호를 제외한 사용자 정보
//! ```
//!
//! 모든 요청 DTO는 핸들러에서 `payload.validate()?`로 검증하며, 실패하면
//! `AppError::ValidationError`(400)로 변환됩니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
