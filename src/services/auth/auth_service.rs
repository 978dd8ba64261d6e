//! 로그인과 비밀번호 재설정 서비스
//!
//! 로그인 실패는 이메일이 없는 경우와 비밀번호가 틀린 경우를 구분하지 않고
//! 같은 메시지를 돌려줍니다.

use std::sync::Arc;

use async_trait::async_trait;
use bcrypt::verify;
use log::{info, warn};
use once_cell::sync::OnceCell;

use crate::core::registry::{Service, ServiceRegistration};
use crate::domain::dto::users::{LoginRequest, ResetPasswordRequest, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserRepository;
use crate::services::auth::token_service::TokenService;
use crate::services::integrations::EmailService;
use crate::services::users::UserService;
use crate::utils::string_utils::generate_reset_code;

static AUTH_SERVICE: OnceCell<Arc<AuthService>> = OnceCell::new();

/// 로그인 성공 결과
#[derive(Debug)]
pub struct LoginResult {
    pub token: String,
    pub user: UserResponse,
}

pub struct AuthService {
    user_repo: Arc<UserRepository>,
    token_service: Arc<TokenService>,
    email_service: Arc<EmailService>,
}

impl AuthService {
    pub fn instance() -> Arc<Self> {
        AUTH_SERVICE
            .get_or_init(|| {
                Arc::new(Self {
                    user_repo: UserRepository::instance(),
                    token_service: TokenService::instance(),
                    email_service: EmailService::instance(),
                })
            })
            .clone()
    }

    fn bad_credentials() -> AppError {
        AppError::ValidationError("Bad credentials.".to_string())
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResult> {
        let user = self
            .user_repo
            .find_by_email(&request.email)
            .await?
            .ok_or_else(Self::bad_credentials)?;

        let matches = verify(&request.password, &user.password)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;
        if !matches {
            warn!("🔒 로그인 실패: {}", user.email);
            return Err(Self::bad_credentials());
        }

        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
        let token = self.token_service.generate_token(&user_id)?;

        info!("🔓 로그인 성공: {}", user.email);
        Ok(LoginResult {
            token,
            user: UserResponse::from(user),
        })
    }

    /// 재설정 코드를 저장하고 메일로 보냅니다. 등록되지 않은 이메일이면 404.
    pub async fn forgot_password(&self, email: &str) -> AppResult<()> {
        let code = generate_reset_code();

        let user = self
            .user_repo
            .set_reset_code(email, &code)
            .await?
            .ok_or_else(|| AppError::NotFound("등록되지 않은 이메일입니다".to_string()))?;

        self.email_service.send_password_reset(&user.email, &code).await?;

        info!("📨 비밀번호 재설정 코드 발송: {}", user.email);
        Ok(())
    }

    /// 이메일과 코드가 일치하면 새 비밀번호로 바꾸고 코드를 비웁니다.
    pub async fn reset_password(&self, request: ResetPasswordRequest) -> AppResult<()> {
        let code = request.code.trim().to_uppercase();
        let password_hash = UserService::hash_password(&request.new_password)?;

        self.user_repo
            .reset_password(&request.email, &code, &password_hash)
            .await?
            .ok_or_else(|| AppError::NotFound("재설정 코드가 일치하지 않습니다".to_string()))?;

        info!("🔑 비밀번호 재설정 완료: {}", request.email);
        Ok(())
    }

    /// CSRF 토큰 (무작위 32자 hex)
    pub fn generate_csrf_token(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

#[async_trait]
impl Service for AuthService {
    fn name(&self) -> &str {
        "auth"
    }
}

fn construct_auth_service() -> Arc<dyn Service> {
    AuthService::instance()
}

inventory::submit! {
    ServiceRegistration {
        name: "auth_service",
        constructor: construct_auth_service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_credentials_is_bad_request() {
        let err = AuthService::bad_credentials();

        assert_eq!(err.status(), actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Bad credentials.");
    }
}
