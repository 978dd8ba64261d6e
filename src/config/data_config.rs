//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 서버, 환경, 요청 제한 관련 설정을 관리합니다.

use std::env;

use super::parsed_var;

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT`(없으면 `NODE_ENV`) 값으로 현재 환경을 판단합니다. 기본값은 Production.
    pub fn current() -> Self {
        let raw = env::var("ENVIRONMENT")
            .or_else(|_| env::var("NODE_ENV"))
            .unwrap_or_else(|_| "production".to_string());
        Self::from_str(&raw)
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// MongoDB 연결 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    pub fn name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "edemy".to_string())
    }
}

/// Redis 연결 및 캐시 TTL 설정
pub struct CacheConfig;

impl CacheConfig {
    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// 캐시 항목 TTL(초), 기본 600
    pub fn ttl_seconds() -> u64 {
        parsed_var("CACHE_TTL_SECONDS", 600)
    }
}

/// bcrypt 비용 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// `BCRYPT_COST`(4..=15)가 있으면 사용하고, 없으면 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        parsed_var("PORT", 8000)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn workers() -> usize {
        parsed_var("WORKERS", 4)
    }

    /// JSON 요청 본문 최대 크기(바이트). 이미지가 base64로 들어오므로 5MB.
    pub fn json_limit_bytes() -> usize {
        parsed_var("JSON_LIMIT_MB", 5usize) * 1024 * 1024
    }

    /// 동영상 업로드 본문 최대 크기(바이트)
    pub fn video_upload_limit_bytes() -> usize {
        parsed_var("VIDEO_UPLOAD_LIMIT_MB", 200usize) * 1024 * 1024
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// `RATE_LIMIT_PER_SECOND`(기본 100), `RATE_LIMIT_BURST_SIZE`(기본 200)
    pub fn load() -> Self {
        Self {
            per_second: parsed_var("RATE_LIMIT_PER_SECOND", 100),
            burst_size: parsed_var("RATE_LIMIT_BURST_SIZE", 200),
        }
    }
}

/// CORS 설정
pub struct CorsConfig;

impl CorsConfig {
    /// `CLIENT_ORIGIN`(쉼표 구분) 목록. 기본값은 로컬 프론트엔드 개발 서버.
    pub fn allowed_origins() -> Vec<String> {
        let raw = env::var("CLIENT_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());
        Self::parse_origins(&raw)
    }

    pub fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|origin| origin.trim().trim_end_matches('/'))
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("DEV"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
        assert!(Environment::from_str("anything").is_production());
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8000);
        }
        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "0.0.0.0");
        }
        if env::var("JSON_LIMIT_MB").is_err() {
            assert_eq!(ServerConfig::json_limit_bytes(), 5 * 1024 * 1024);
        }
        if env::var("VIDEO_UPLOAD_LIMIT_MB").is_err() {
            assert_eq!(ServerConfig::video_upload_limit_bytes(), 200 * 1024 * 1024);
        }
    }

    #[test]
    fn test_parse_origins() {
        let origins = CorsConfig::parse_origins(" http://localhost:3000/ , https://edemy.app,, ");
        assert_eq!(origins, vec!["http://localhost:3000", "https://edemy.app"]);
    }
}
