//! # Core Module
//!
//! 싱글톤 서비스/리포지토리를 보관하는 [`registry`]와 공용 에러 타입 재노출.
//!
//! 인프라 핸들(`Database`, `RedisClient`, `reqwest::Client`)은 `main`에서
//! [`ServiceLocator::set`]으로 등록하고, 리포지토리와 서비스는 각자
//! `inventory::submit!`으로 생성자를 등록한 뒤 [`ServiceLocator::initialize_all`]
//! 단계에서 한 번씩 만들어집니다.

pub mod registry;

pub use crate::errors::{AppError, AppResult, ErrorContext};
pub use registry::*;
