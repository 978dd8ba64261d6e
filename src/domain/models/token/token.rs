//! JWT 클레임 구조체

use serde::{Deserialize, Serialize};

/// 인증 토큰 클레임
///
/// - `_id`: 사용자 ObjectId (hex)
/// - `iat`: 발급 시간 (Unix timestamp)
/// - `exp`: 만료 시간 (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "_id")]
    pub user_id: String,
    pub iat: i64,
    pub exp: i64,
}
