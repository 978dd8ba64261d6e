//! 인증 서비스: JWT 발급/검증, 로그인, 비밀번호 재설정

pub mod token_service;
pub mod auth_service;

pub use token_service::TokenService;
pub use auth_service::AuthService;
