//! # 강사 서비스
//!
//! Stripe Express 연결 계정으로 강사를 온보딩하고, 강사 대시보드에 필요한
//! 수강생 수, 잔액, 정산 설정 링크를 제공합니다.
//!
//! 온보딩 흐름:
//!
//! 1. `make_instructor` - 연결 계정이 없으면 만들고 온보딩 링크 URL을 반환
//! 2. 사용자가 Stripe에서 온보딩을 마치고 돌아옴
//! 3. `account_status` - 계정의 `charges_enabled`를 확인하고 강사 역할 부여

use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use mongodb::bson::oid::ObjectId;
use once_cell::sync::OnceCell;

use crate::config::StripeConfig;
use crate::core::registry::{Service, ServiceRegistration};
use crate::domain::dto::instructors::StudentRef;
use crate::domain::dto::users::UserResponse;
use crate::domain::entities::users::user::User;
use crate::domain::models::payments::stripe::Balance;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserRepository;
use crate::services::courses::CourseService;
use crate::services::integrations::payment_service::onboarding_redirect_url;
use crate::services::integrations::PaymentService;

static INSTRUCTOR_SERVICE: OnceCell<Arc<InstructorService>> = OnceCell::new();

pub struct InstructorService {
    user_repo: Arc<UserRepository>,
    course_service: Arc<CourseService>,
    payment: Arc<PaymentService>,
}

/// 로그인 링크 뒤에 설정 화면 복귀 URL을 붙입니다.
pub fn payout_settings_url(login_url: &str, settings_redirect: Option<&str>) -> String {
    match settings_redirect {
        Some(redirect) => format!("{}?redirect_url={}", login_url, urlencoding::encode(redirect)),
        None => login_url.to_string(),
    }
}

impl InstructorService {
    pub fn instance() -> Arc<Self> {
        INSTRUCTOR_SERVICE
            .get_or_init(|| {
                Arc::new(Self {
                    user_repo: UserRepository::instance(),
                    course_service: CourseService::instance(),
                    payment: PaymentService::instance(),
                })
            })
            .clone()
    }

    async fn user(&self, user_id: &ObjectId) -> AppResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("사용자가 존재하지 않습니다".to_string()))
    }

    fn account_id(user: &User) -> AppResult<String> {
        user.stripe_account_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::ValidationError("연결된 정산 계정이 없습니다".to_string()))
    }

    /// 연결 계정을 준비하고 온보딩 링크 URL을 반환합니다.
    pub async fn make_instructor(&self, user_id: &ObjectId) -> AppResult<String> {
        let user = self.user(user_id).await?;

        let account_id = match user.stripe_account_id.clone().filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => {
                let account = self.payment.create_express_account(&user.email).await?;
                self.user_repo.set_stripe_account_id(user_id, &account.id).await?;
                account.id
            }
        };

        let link = self
            .payment
            .create_account_link(&account_id, &StripeConfig::redirect_url()?)
            .await?;

        info!("🔗 강사 온보딩 링크 발급: {}", user.email);
        Ok(onboarding_redirect_url(&link))
    }

    /// 연결 계정 상태를 확인하고 결제가 가능하면 강사로 승격합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - `charges_enabled`가 false인 경우
    pub async fn account_status(&self, user_id: &ObjectId) -> AppResult<UserResponse> {
        let user = self.user(user_id).await?;
        let account_id = Self::account_id(&user)?;

        let account = self.payment.retrieve_account(&account_id).await?;
        if !account.charges_enabled {
            warn!("🚫 결제 불가 계정: {} ({})", user.email, account_id);
            return Err(AppError::AuthenticationError(
                "정산 계정 설정이 완료되지 않았습니다".to_string(),
            ));
        }

        let updated = self
            .user_repo
            .promote_to_instructor(user_id, &account)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("사용자가 존재하지 않습니다".to_string()))?;

        info!("🎉 강사 승격: {}", updated.email);
        Ok(UserResponse::from(updated))
    }

    /// 호출자가 강의 소유자일 때 수강생 id 목록을 반환합니다.
    pub async fn student_count(
        &self,
        user_id: &ObjectId,
        course_id: &ObjectId,
    ) -> AppResult<Vec<StudentRef>> {
        let course = self.course_service.find_owned_by_id(course_id, user_id).await?;

        let students = self
            .user_repo
            .find_ids_enrolled_in(course_id)
            .await?
            .into_iter()
            .map(|id| StudentRef { id: id.to_hex() })
            .collect::<Vec<_>>();

        info!("👥 수강생 조회: {} ({}명)", course.slug, students.len());
        Ok(students)
    }

    pub async fn balance(&self, user_id: &ObjectId) -> AppResult<Balance> {
        let user = self.user(user_id).await?;
        let account_id = Self::account_id(&user)?;

        self.payment.retrieve_balance(&account_id).await
    }

    pub async fn payout_settings(&self, user_id: &ObjectId) -> AppResult<String> {
        let user = self.user(user_id).await?;
        let account_id = Self::account_id(&user)?;

        let link = self.payment.create_login_link(&account_id).await?;
        let settings_redirect = StripeConfig::settings_redirect();

        Ok(payout_settings_url(&link.url, settings_redirect.as_deref()))
    }
}

#[async_trait]
impl Service for InstructorService {
    fn name(&self) -> &str {
        "instructor"
    }
}

fn construct_instructor_service() -> Arc<dyn Service> {
    InstructorService::instance()
}

inventory::submit! {
    ServiceRegistration {
        name: "instructor_service",
        constructor: construct_instructor_service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payout_settings_url() {
        assert_eq!(
            payout_settings_url("https://connect.stripe.com/express/abc", None),
            "https://connect.stripe.com/express/abc"
        );
        assert_eq!(
            payout_settings_url(
                "https://connect.stripe.com/express/abc",
                Some("http://localhost:3000/instructor/revenue")
            ),
            "https://connect.stripe.com/express/abc?redirect_url=http%3A%2F%2Flocalhost%3A3000%2Finstructor%2Frevenue"
        );
    }
}
