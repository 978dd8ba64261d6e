//! 캐싱 계층 모듈
//!
//! Redis를 읽기 캐시로 사용합니다. 사용자(id), 강의(slug), 공개 강의 목록을
//! 캐시하며, 쓰기 시 관련 키를 지웁니다.
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! CACHE_TTL_SECONDS=600             # 기본값
//! ```

pub mod redis;

/// 캐시 키 생성 규칙
pub struct CacheKeys;

impl CacheKeys {
    pub fn user(id: &str) -> String {
        format!("user:{}", id)
    }

    pub fn course(slug: &str) -> String {
        format!("course:slug:{}", slug)
    }

    pub fn published_courses() -> String {
        "courses:published".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_keys() {
        assert_eq!(CacheKeys::user("abc"), "user:abc");
        assert_eq!(CacheKeys::course("react-101"), "course:slug:react-101");
        assert_eq!(CacheKeys::published_courses(), "courses:published");
    }
}
