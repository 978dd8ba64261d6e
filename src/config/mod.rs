//! 환경 변수 기반 설정 모듈
//!
//! 모든 설정은 값 객체가 아닌 정적 접근자(`JwtConfig::secret()` 등)로 제공되며,
//! 호출 시점의 환경 변수를 읽습니다. `.env` 파일은 `main`에서 `PROFILE`에 따라 로드됩니다.

pub mod data_config;
pub mod auth_config;
pub mod integration_config;

pub use data_config::*;
pub use auth_config::*;
pub use integration_config::*;

use crate::errors::{AppError, AppResult};

/// 필수 환경 변수를 읽습니다. 비어 있거나 없으면 `InternalError`를 반환합니다.
pub(crate) fn required_var(name: &str) -> AppResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::InternalError(format!("{} must be set", name))),
    }
}

/// 숫자형 환경 변수를 읽고, 없거나 파싱에 실패하면 기본값을 사용합니다.
pub(crate) fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}
