//! # 사용자 관련 요청 DTO 모듈

pub mod create_user_request;
pub mod auth_request;
pub mod password_request;

pub use create_user_request::RegisterRequest;
pub use auth_request::LoginRequest;
pub use password_request::{ForgotPasswordRequest, ResetPasswordRequest};
