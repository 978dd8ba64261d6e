//! JWT 토큰 관리 서비스 구현
//!
//! HS256으로 서명한 `{_id, iat, exp}` 토큰을 발급/검증하고, 요청의
//! `token` 쿠키 또는 `Authorization: Bearer` 헤더에서 토큰을 꺼냅니다.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;

use crate::config::JwtConfig;
use crate::core::registry::{Service, ServiceRegistration};
use crate::domain::token::TokenClaims;
use crate::errors::{AppError, AppResult};

static TOKEN_SERVICE: OnceCell<Arc<TokenService>> = OnceCell::new();

pub struct TokenService;

impl TokenService {
    pub fn instance() -> Arc<Self> {
        TOKEN_SERVICE.get_or_init(|| Arc::new(Self)).clone()
    }

    /// 사용자 id로 인증 토큰을 발급합니다. 유효 기간은 `JWT_EXPIRATION_DAYS`.
    pub fn generate_token(&self, user_id: &str) -> AppResult<String> {
        Self::encode_claims(
            user_id,
            Utc::now(),
            Duration::days(JwtConfig::expiration_days()),
            &JwtConfig::secret()?,
        )
    }

    pub fn verify_token(&self, token: &str) -> AppResult<TokenClaims> {
        Self::decode_claims(token, &JwtConfig::secret()?)
    }

    fn encode_claims(
        user_id: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
        secret: &str,
    ) -> AppResult<String> {
        let claims = TokenClaims {
            user_id: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    fn decode_claims(token: &str, secret: &str) -> AppResult<TokenClaims> {
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|token_data| token_data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
            }
            _ => AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()),
        })
    }

    /// 쿠키 값을 우선 사용하고, 없으면 Bearer 헤더에서 토큰을 꺼냅니다.
    pub fn resolve_token(cookie: Option<&str>, auth_header: Option<&str>) -> Option<String> {
        if let Some(token) = cookie.map(str::trim).filter(|t| !t.is_empty()) {
            return Some(token.to_string());
        }

        auth_header
            .and_then(|header| header.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }
}

#[async_trait]
impl Service for TokenService {
    fn name(&self) -> &str {
        "token"
    }
}

fn construct_token_service() -> Arc<dyn Service> {
    TokenService::instance()
}

inventory::submit! {
    ServiceRegistration {
        name: "token_service",
        constructor: construct_token_service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";
    const USER_ID: &str = "64b7f0c2a1b2c3d4e5f60718";

    #[test]
    fn test_token_roundtrip() {
        let token = TokenService::encode_claims(USER_ID, Utc::now(), Duration::days(7), SECRET).unwrap();
        let claims = TokenService::decode_claims(&token, SECRET).unwrap();

        assert_eq!(claims.user_id, USER_ID);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
    }

    #[test]
    fn test_claims_use_underscore_id() {
        let token = TokenService::encode_claims(USER_ID, Utc::now(), Duration::days(1), SECRET).unwrap();
        let payload = token.split('.').nth(1).unwrap();

        use base64::Engine;
        let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(payload).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&decoded).unwrap();

        assert_eq!(json["_id"], USER_ID);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = TokenService::encode_claims(USER_ID, Utc::now(), Duration::days(1), SECRET).unwrap();
        let result = TokenService::decode_claims(&token, "other-secret");

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let issued = Utc::now() - Duration::days(10);
        let token = TokenService::encode_claims(USER_ID, issued, Duration::days(7), SECRET).unwrap();

        match TokenService::decode_claims(&token, SECRET) {
            Err(AppError::AuthenticationError(msg)) => assert!(msg.contains("만료")),
            other => panic!("expected expiry error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_token_prefers_cookie() {
        assert_eq!(
            TokenService::resolve_token(Some("cookie-token"), Some("Bearer header-token")),
            Some("cookie-token".to_string())
        );
        assert_eq!(
            TokenService::resolve_token(None, Some("Bearer header-token")),
            Some("header-token".to_string())
        );
        assert_eq!(TokenService::resolve_token(Some(""), Some("Basic abc")), None);
        assert_eq!(TokenService::resolve_token(None, None), None);
    }
}
