//! 인증된 사용자 정보 추출기

use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// 인증 미들웨어가 request extensions에 넣어 두는 사용자 정보
///
/// 핸들러 인자로 선언하면 자동으로 추출됩니다. 미들웨어를 거치지 않은
/// 요청에서는 401을 반환합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

impl AuthenticatedUser {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    /// 사용자 id를 ObjectId로 변환합니다.
    pub fn object_id(&self) -> Result<ObjectId, AppError> {
        ObjectId::parse_str(&self.user_id)
            .map_err(|_| AppError::AuthenticationError("잘못된 사용자 식별자입니다".to_string()))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extracts_user_from_extensions() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut()
            .insert(AuthenticatedUser::new("64b7f0c2a1b2c3d4e5f60718"));

        let user = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(user.user_id, "64b7f0c2a1b2c3d4e5f60718");
        assert!(user.object_id().is_ok());
    }

    #[actix_web::test]
    async fn test_missing_user_is_unauthorized() {
        let req = TestRequest::default().to_http_request();

        let result = AuthenticatedUser::extract(&req).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_invalid_object_id() {
        let user = AuthenticatedUser::new("not-an-object-id");
        assert!(user.object_id().is_err());
    }
}
