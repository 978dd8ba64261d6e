//! 수강 신청 HTTP 핸들러

use actix_web::{get, post, web, HttpResponse};

use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::errors::AppError;
use crate::handlers::string_response;
use crate::middlewares::AuthMiddleware;
use crate::services::enrollment::EnrollmentService;
use crate::utils::string_utils::parse_object_id;

#[get("/check-enrollment/{course_id}", wrap = "AuthMiddleware::required()")]
pub async fn check_enrollment(
    user: AuthenticatedUser,
    course_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let course_id = parse_object_id(&course_id, "강의 id")?;

    let status = EnrollmentService::instance()
        .check(&user.object_id()?, &course_id)
        .await?;

    Ok(HttpResponse::Ok().json(status))
}

#[post("/free-enrollment/{course_id}", wrap = "AuthMiddleware::required()")]
pub async fn free_enrollment(
    user: AuthenticatedUser,
    course_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let course_id = parse_object_id(&course_id, "강의 id")?;

    let result = EnrollmentService::instance()
        .enroll_free(&user.object_id()?, &course_id)
        .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// 체크아웃 세션 생성. 본문은 세션 id 문자열이며 클라이언트는 이 id로 결제 페이지에 이동합니다.
#[post("/paid-enrollment/{course_id}", wrap = "AuthMiddleware::required()")]
pub async fn paid_enrollment(
    user: AuthenticatedUser,
    course_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let course_id = parse_object_id(&course_id, "강의 id")?;

    let session_id = EnrollmentService::instance()
        .enroll_paid(&user.object_id()?, &course_id)
        .await?;

    Ok(string_response(&session_id))
}

/// 결제 완료 후 돌아온 사용자의 수강 등록
#[get("/stripe-success/{course_id}", wrap = "AuthMiddleware::required()")]
pub async fn stripe_success(
    user: AuthenticatedUser,
    course_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let course_id = parse_object_id(&course_id, "강의 id")?;

    let course = EnrollmentService::instance()
        .confirm_payment(&user.object_id()?, &course_id)
        .await?;

    Ok(HttpResponse::Ok().json(course))
}

#[get("/user-courses", wrap = "AuthMiddleware::required()")]
pub async fn user_courses(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let courses = EnrollmentService::instance()
        .user_courses(&user.object_id()?)
        .await?;

    Ok(HttpResponse::Ok().json(courses))
}
