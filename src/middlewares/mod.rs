//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사를 처리합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `token` 쿠키 또는 `Authorization: Bearer` 헤더의 JWT 검증
//! - 사용자 정보를 request extension에 저장
//! - 강사 전용 라우트는 저장된 사용자 역할까지 확인
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::AuthMiddleware;
//!
//! web::scope("")
//!     .wrap(AuthMiddleware::instructor()) // 로그인 + Instructor 역할
//!     .service(handlers::courses::create_course)
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
