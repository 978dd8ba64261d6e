//! # Authentication Configuration Module
//!
//! JWT 서명과 인증 쿠키 관련 설정을 관리합니다.
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_DAYS="7"
//! export COOKIE_SECURE="true"
//! ```

use std::env;

use super::{parsed_var, required_var, Environment};
use crate::errors::AppResult;

const DEV_JWT_SECRET: &str = "your-secret-key";

/// JWT 토큰 설정
pub struct JwtConfig;

impl JwtConfig {
    /// 서명 키. 운영 환경에서는 `JWT_SECRET`이 반드시 있어야 합니다.
    pub fn secret() -> AppResult<String> {
        let environment = Environment::current();
        if environment.is_production() {
            return required_var("JWT_SECRET");
        }

        Ok(Self::secret_or_default(env::var("JWT_SECRET").ok()))
    }

    fn secret_or_default(value: Option<String>) -> String {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(secret) => secret,
            None => {
                log::warn!("JWT_SECRET not set, using development default");
                DEV_JWT_SECRET.to_string()
            }
        }
    }

    /// 토큰 유효 기간(일), 기본 7일
    pub fn expiration_days() -> i64 {
        parsed_var("JWT_EXPIRATION_DAYS", 7)
    }
}

/// 인증/CSRF 쿠키 설정
pub struct CookieConfig;

impl CookieConfig {
    /// 인증 토큰을 담는 쿠키 이름
    pub const TOKEN_COOKIE: &'static str = "token";

    /// CSRF 시크릿을 담는 쿠키 이름
    pub const CSRF_COOKIE: &'static str = "_csrf";

    /// `COOKIE_SECURE`가 명시되지 않으면 운영 환경에서만 Secure 속성을 붙입니다.
    pub fn secure() -> bool {
        match env::var("COOKIE_SECURE") {
            Ok(value) => matches!(value.to_lowercase().as_str(), "true" | "1" | "yes"),
            Err(_) => Environment::current().is_production(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_expiration_default() {
        if env::var("JWT_EXPIRATION_DAYS").is_err() {
            assert_eq!(JwtConfig::expiration_days(), 7);
        }
    }

    #[test]
    fn test_jwt_secret_required_in_production() {
        if Environment::current().is_production() && env::var("JWT_SECRET").is_err() {
            assert!(JwtConfig::secret().is_err());
        }
    }

    #[test]
    fn test_jwt_secret_default_outside_production() {
        assert_eq!(JwtConfig::secret_or_default(None), DEV_JWT_SECRET);
        assert_eq!(JwtConfig::secret_or_default(Some("  ".into())), DEV_JWT_SECRET);
        assert_eq!(JwtConfig::secret_or_default(Some("s3cret".into())), "s3cret");
    }

    #[test]
    fn test_cookie_names() {
        assert_eq!(CookieConfig::TOKEN_COOKIE, "token");
        assert_eq!(CookieConfig::CSRF_COOKIE, "_csrf");
    }
}
