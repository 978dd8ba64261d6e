//! 강사 온보딩 / 대시보드 핸들러
//!
//! `make-instructor`와 `get-account-status`는 아직 강사가 아닌 사용자도
//! 호출하므로 로그인만 확인합니다. 나머지는 저장된 역할에 `Instructor`가 필요합니다.

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::enrollment::CourseIdRequest;
use crate::errors::AppError;
use crate::handlers::{ok_body, string_response};
use crate::middlewares::AuthMiddleware;
use crate::services::courses::CourseService;
use crate::services::instructors::InstructorService;
use crate::services::users::UserService;
use crate::utils::string_utils::parse_object_id;

/// 정산 계정 온보딩 링크 발급
#[post("/make-instructor", wrap = "AuthMiddleware::required()")]
pub async fn make_instructor(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let url = InstructorService::instance()
        .make_instructor(&user.object_id()?)
        .await?;

    Ok(string_response(&url))
}

/// 온보딩 완료 확인 후 강사 승격. 결제가 불가능한 계정이면 401.
#[post("/get-account-status", wrap = "AuthMiddleware::required()")]
pub async fn get_account_status(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let updated = InstructorService::instance()
        .account_status(&user.object_id()?)
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}

#[get("/current-instructor", wrap = "AuthMiddleware::required()")]
pub async fn current_instructor(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    UserService::instance()
        .ensure_instructor(&user.object_id()?)
        .await?;

    Ok(HttpResponse::Ok().json(ok_body()))
}

#[get("/instructor-courses", wrap = "AuthMiddleware::instructor()")]
pub async fn instructor_courses(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let courses = CourseService::instance()
        .instructor_courses(&user.object_id()?)
        .await?;

    Ok(HttpResponse::Ok().json(courses))
}

/// 강의 수강생 목록 `[{_id}]`
#[post("/instructor/student-count", wrap = "AuthMiddleware::instructor()")]
pub async fn student_count(
    user: AuthenticatedUser,
    payload: web::Json<CourseIdRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let course_id = parse_object_id(&payload.course_id, "강의 id")?;

    let students = InstructorService::instance()
        .student_count(&user.object_id()?, &course_id)
        .await?;

    Ok(HttpResponse::Ok().json(students))
}

#[get("/instructor/balance", wrap = "AuthMiddleware::instructor()")]
pub async fn instructor_balance(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let balance = InstructorService::instance()
        .balance(&user.object_id()?)
        .await?;

    Ok(HttpResponse::Ok().json(balance))
}

/// 정산 대시보드 로그인 링크
#[get("/instructor/payout-settings", wrap = "AuthMiddleware::instructor()")]
pub async fn payout_settings(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let url = InstructorService::instance()
        .payout_settings(&user.object_id()?)
        .await?;

    Ok(string_response(&url))
}
