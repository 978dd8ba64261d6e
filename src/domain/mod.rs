//! 도메인 계층: 엔티티, 요청/응답 DTO, 인증/결제 모델

pub mod entities;
pub mod dto;
pub mod models;

pub use models::*;
