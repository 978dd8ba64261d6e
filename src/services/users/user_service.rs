//! # 사용자 관리 서비스 구현
//!
//! 회원가입(비밀번호 해싱 포함)과 사용자 조회를 담당합니다.
//!
//! ```text
//! register ─▶ 정규화 ─▶ 이메일 중복 확인 ─▶ bcrypt(cost by env) ─▶ users.insert
//! ```
//!
//! bcrypt cost는 `PasswordConfig::bcrypt_cost()`를 따르며 개발/테스트에서는 4,
//! 운영에서는 12입니다.

use std::sync::Arc;

use async_trait::async_trait;
use bcrypt::hash;
use log::info;
use mongodb::bson::oid::ObjectId;
use once_cell::sync::OnceCell;

use crate::config::PasswordConfig;
use crate::core::registry::{Service, ServiceRegistration};
use crate::domain::dto::users::{RegisterRequest, UserResponse};
use crate::domain::entities::users::user::{Role, User};
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserRepository;

static USER_SERVICE: OnceCell<Arc<UserService>> = OnceCell::new();

pub struct UserService {
    user_repo: Arc<UserRepository>,
}

impl UserService {
    pub fn instance() -> Arc<Self> {
        USER_SERVICE
            .get_or_init(|| {
                Arc::new(Self {
                    user_repo: UserRepository::instance(),
                })
            })
            .clone()
    }

    /// 새 구독자 계정을 만듭니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 이메일이 이미 사용 중인 경우
    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserResponse> {
        let request = request.normalized();

        if self.user_repo.find_by_email(&request.email).await?.is_some() {
            return Err(Self::email_taken());
        }

        let password_hash = Self::hash_password(&request.password)?;
        let user = User::new(request.name, request.email, password_hash);

        let created = self.user_repo.create(user).await.map_err(|e| match e {
            AppError::ConflictError(_) => Self::email_taken(),
            other => other,
        })?;

        info!("✅ 회원가입 완료: {}", created.email);
        Ok(UserResponse::from(created))
    }

    fn email_taken() -> AppError {
        AppError::ValidationError("Email is taken.".to_string())
    }

    pub fn hash_password(password: &str) -> AppResult<String> {
        hash(password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))
    }

    /// 토큰의 사용자가 아직 존재하는지 확인합니다. 삭제된 계정이면 401.
    pub async fn ensure_exists(&self, id: &ObjectId) -> AppResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("사용자가 존재하지 않습니다".to_string()))
    }

    /// 저장된 역할 기준으로 강사 여부를 확인합니다. 아니면 403.
    pub async fn ensure_instructor(&self, id: &ObjectId) -> AppResult<User> {
        let user = self.ensure_exists(id).await?;

        if !user.has_role(Role::Instructor) {
            return Err(AppError::AuthorizationError("강사 권한이 필요합니다".to_string()));
        }

        Ok(user)
    }
}

#[async_trait]
impl Service for UserService {
    fn name(&self) -> &str {
        "user"
    }
}

fn construct_user_service() -> Arc<dyn Service> {
    UserService::instance()
}

inventory::submit! {
    ServiceRegistration {
        name: "user_service",
        constructor: construct_user_service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_verifies() {
        let hashed = UserService::hash_password("secret1").unwrap();

        assert_ne!(hashed, "secret1");
        assert!(bcrypt::verify("secret1", &hashed).unwrap());
        assert!(!bcrypt::verify("secret2", &hashed).unwrap());
    }

    #[test]
    fn test_email_taken_is_bad_request() {
        let err = UserService::email_taken();

        assert_eq!(err.status(), actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Email is taken.");
    }
}
