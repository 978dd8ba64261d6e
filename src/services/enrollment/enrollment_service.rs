//! # 수강 신청 서비스
//!
//! 무료 강의는 바로 수강 목록에 추가하고, 유료 강의는 체크아웃 세션을 만든 뒤
//! 결제 완료 확인(`stripe_success`) 시점에 추가합니다.
//!
//! ```text
//! paid ─▶ checkout session (수수료 = application fee, 나머지는 강사 계정으로)
//!      ─▶ users.stripeSession = {id, course}
//! stripe_success ─▶ 대기 세션의 course 확인 ─▶ session 조회
//!                ─▶ paid면 courses += id, stripeSession 제거
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use mongodb::bson::oid::ObjectId;
use once_cell::sync::OnceCell;

use crate::config::StripeConfig;
use crate::core::registry::{Service, ServiceRegistration};
use crate::domain::dto::courses::CourseResponse;
use crate::domain::dto::enrollment::{EnrollmentResponse, EnrollmentStatusResponse};
use crate::domain::entities::courses::Course;
use crate::domain::entities::users::user::{StripeSession, User};
use crate::domain::models::payments::stripe::{CheckoutRequest, CheckoutSession};
use crate::errors::{AppError, AppResult};
use crate::repositories::courses::CourseRepository;
use crate::repositories::users::UserRepository;
use crate::services::courses::CourseService;
use crate::services::integrations::payment_service::{platform_fee_cents, price_to_cents};
use crate::services::integrations::PaymentService;

static ENROLLMENT_SERVICE: OnceCell<Arc<EnrollmentService>> = OnceCell::new();

/// 수강 방식(`paid_checkout`)이 강의의 유료 여부와 맞는지 확인합니다.
pub fn ensure_enrollable(course: &Course, paid_checkout: bool) -> AppResult<()> {
    match (course.paid, paid_checkout) {
        (true, false) => Err(AppError::ValidationError(
            "유료 강의는 결제 후 수강할 수 있습니다".to_string(),
        )),
        (false, true) => Err(AppError::ValidationError("무료 강의입니다".to_string())),
        _ => Ok(()),
    }
}

/// 결제 금액을 받을 강사의 연결 계정 id
pub fn payout_destination(instructor: &User) -> AppResult<String> {
    instructor
        .stripe_account_id
        .clone()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::ValidationError("강사의 정산 계정이 설정되지 않았습니다".to_string()))
}

/// 대기 중인 세션이 이 강의의 결제인지 확인하고 세션 id를 돌려줍니다.
pub fn pending_session_id(
    pending: Option<&StripeSession>,
    course_id: &ObjectId,
) -> AppResult<String> {
    let session = pending
        .filter(|session| !session.id.is_empty())
        .ok_or_else(|| AppError::ValidationError("대기 중인 결제가 없습니다".to_string()))?;

    if session.course.as_ref() != Some(course_id) {
        return Err(AppError::ValidationError(
            "다른 강의의 결제 세션입니다".to_string(),
        ));
    }

    Ok(session.id.clone())
}

/// 결제 프로세서가 돌려준 세션의 참조 id가 강의와 같은지 확인합니다.
pub fn ensure_session_for_course(session: &CheckoutSession, course_id: &ObjectId) -> AppResult<()> {
    match session.client_reference_id.as_deref() {
        Some(reference) if reference != course_id.to_hex() => Err(AppError::ValidationError(
            "다른 강의의 결제 세션입니다".to_string(),
        )),
        _ => Ok(()),
    }
}

pub struct EnrollmentService {
    course_repo: Arc<CourseRepository>,
    user_repo: Arc<UserRepository>,
    course_service: Arc<CourseService>,
    payment: Arc<PaymentService>,
}

impl EnrollmentService {
    pub fn instance() -> Arc<Self> {
        ENROLLMENT_SERVICE
            .get_or_init(|| {
                Arc::new(Self {
                    course_repo: CourseRepository::instance(),
                    user_repo: UserRepository::instance(),
                    course_service: CourseService::instance(),
                    payment: PaymentService::instance(),
                })
            })
            .clone()
    }

    async fn course(&self, course_id: &ObjectId) -> AppResult<Course> {
        self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("강의를 찾을 수 없습니다: {}", course_id.to_hex())))
    }

    async fn user(&self, user_id: &ObjectId) -> AppResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("사용자가 존재하지 않습니다".to_string()))
    }

    pub async fn check(
        &self,
        user_id: &ObjectId,
        course_id: &ObjectId,
    ) -> AppResult<EnrollmentStatusResponse> {
        let course = self.course(course_id).await?;
        let user = self.user(user_id).await?;

        Ok(EnrollmentStatusResponse {
            status: user.is_enrolled_in(course_id),
            course: self.course_service.populate_one(course).await?,
        })
    }

    /// 무료 강의 수강 신청. 유료 강의면 400.
    pub async fn enroll_free(
        &self,
        user_id: &ObjectId,
        course_id: &ObjectId,
    ) -> AppResult<EnrollmentResponse> {
        let course = self.course(course_id).await?;
        ensure_enrollable(&course, false)?;

        self.user_repo
            .add_course(user_id, course_id, false)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("사용자가 존재하지 않습니다".to_string()))?;

        info!("🎓 무료 수강 신청: {} → {}", user_id.to_hex(), course.slug);
        Ok(EnrollmentResponse {
            message: "수강 신청이 완료되었습니다".to_string(),
            course: self.course_service.populate_one(course).await?,
        })
    }

    /// 유료 강의 체크아웃 세션을 만들고 사용자에 대기 세션으로 기록합니다.
    /// 반환값은 체크아웃 세션 id입니다.
    pub async fn enroll_paid(&self, user_id: &ObjectId, course_id: &ObjectId) -> AppResult<String> {
        let course = self.course(course_id).await?;
        ensure_enrollable(&course, true)?;

        let instructor = self
            .user_repo
            .find_by_id(&course.instructor)
            .await?
            .ok_or_else(|| AppError::NotFound("강사를 찾을 수 없습니다".to_string()))?;

        let destination = payout_destination(&instructor)?;

        let request = CheckoutRequest {
            product_name: course.name.clone(),
            currency: StripeConfig::currency(),
            unit_amount: price_to_cents(course.price),
            application_fee_amount: platform_fee_cents(course.price, StripeConfig::platform_fee_percent()),
            destination,
            client_reference_id: course_id.to_hex(),
            success_url: format!(
                "{}/{}",
                StripeConfig::success_url()?.trim_end_matches('/'),
                course_id.to_hex()
            ),
            cancel_url: StripeConfig::cancel_url()?,
        };

        let session = self.payment.create_checkout_session(&request).await?;

        self.user_repo
            .set_stripe_session(user_id, &session.id, course_id)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("사용자가 존재하지 않습니다".to_string()))?;

        info!(
            "💳 유료 수강 결제 시작: {} → {} ({} cents)",
            user_id.to_hex(),
            course.slug,
            request.unit_amount
        );
        Ok(session.id)
    }

    /// 대기 중인 결제 세션을 확인하고 결제되었으면 수강 목록에 추가합니다.
    pub async fn confirm_payment(
        &self,
        user_id: &ObjectId,
        course_id: &ObjectId,
    ) -> AppResult<CourseResponse> {
        let course = self.course(course_id).await?;
        let user = self.user(user_id).await?;

        let session_id = pending_session_id(user.stripe_session.as_ref(), course_id)?;

        let session = self.payment.retrieve_checkout_session(&session_id).await?;
        ensure_session_for_course(&session, course_id)?;

        if session.is_paid() {
            self.user_repo.add_course(user_id, course_id, true).await?;
            info!("🎓 결제 완료 수강 등록: {} → {}", user_id.to_hex(), course.slug);
        } else {
            warn!(
                "⏳ 결제 미완료 ({}): {}",
                session.payment_status, session_id
            );
        }

        self.course_service.populate_one(course).await
    }

    pub async fn user_courses(&self, user_id: &ObjectId) -> AppResult<Vec<CourseResponse>> {
        let user = self.user(user_id).await?;
        let courses = self.course_repo.find_by_ids(&user.courses).await?;
        self.course_service.populate(courses).await
    }
}

#[async_trait]
impl Service for EnrollmentService {
    fn name(&self) -> &str {
        "enrollment"
    }
}

fn construct_enrollment_service() -> Arc<dyn Service> {
    EnrollmentService::instance()
}

inventory::submit! {
    ServiceRegistration {
        name: "enrollment_service",
        constructor: construct_enrollment_service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::courses::NewCourse;

    fn course(paid: bool) -> Course {
        Course::new(NewCourse {
            name: "Rust Web".into(),
            slug: "rust-web".into(),
            description: "x".repeat(200),
            price: None,
            category: None,
            paid: Some(paid),
            image: None,
            instructor: ObjectId::new(),
        })
    }

    fn checkout(client_reference_id: Option<String>) -> CheckoutSession {
        CheckoutSession {
            id: "cs_test_123".into(),
            url: None,
            payment_status: "paid".into(),
            client_reference_id,
        }
    }

    #[test]
    fn test_free_enrollment_on_paid_course_is_rejected() {
        let result = ensure_enrollable(&course(true), false);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(ensure_enrollable(&course(false), false).is_ok());
    }

    #[test]
    fn test_paid_enrollment_on_free_course_is_rejected() {
        let result = ensure_enrollable(&course(false), true);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(ensure_enrollable(&course(true), true).is_ok());
    }

    #[test]
    fn test_instructor_without_payout_account() {
        let mut instructor = User::new("Kim".into(), "kim@example.com".into(), "hash".into());
        assert_eq!(
            payout_destination(&instructor).unwrap_err().status(),
            actix_web::http::StatusCode::BAD_REQUEST
        );

        instructor.stripe_account_id = Some(String::new());
        assert!(payout_destination(&instructor).is_err());

        instructor.stripe_account_id = Some("acct_123".into());
        assert_eq!(payout_destination(&instructor).unwrap(), "acct_123");
    }

    #[test]
    fn test_no_pending_session() {
        let course_id = ObjectId::new();

        assert!(matches!(
            pending_session_id(None, &course_id),
            Err(AppError::ValidationError(_))
        ));

        let empty = StripeSession { id: String::new(), course: Some(course_id) };
        assert!(pending_session_id(Some(&empty), &course_id).is_err());
    }

    #[test]
    fn test_pending_session_for_another_course() {
        let course_id = ObjectId::new();
        let other = StripeSession { id: "cs_test_123".into(), course: Some(ObjectId::new()) };
        assert!(matches!(
            pending_session_id(Some(&other), &course_id),
            Err(AppError::ValidationError(_))
        ));

        let untagged = StripeSession { id: "cs_test_123".into(), course: None };
        assert!(pending_session_id(Some(&untagged), &course_id).is_err());

        let matching = StripeSession { id: "cs_test_123".into(), course: Some(course_id) };
        assert_eq!(pending_session_id(Some(&matching), &course_id).unwrap(), "cs_test_123");
    }

    #[test]
    fn test_checkout_reference_must_match_course() {
        let course_id = ObjectId::new();

        assert!(ensure_session_for_course(&checkout(Some(course_id.to_hex())), &course_id).is_ok());
        assert!(ensure_session_for_course(&checkout(None), &course_id).is_ok());
        assert!(matches!(
            ensure_session_for_course(&checkout(Some(ObjectId::new().to_hex())), &course_id),
            Err(AppError::ValidationError(_))
        ));
    }
}
