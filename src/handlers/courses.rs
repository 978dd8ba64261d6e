//! 강의 HTTP 핸들러
//!
//! 공개 목록/상세는 인증 없이, 작성/수정/공개 전환은 강사만 사용할 수 있습니다.

use actix_web::{get, post, put, web, HttpResponse};
use validator::Validate;

use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::courses::{CreateCourseRequest, UpdateCourseRequest};
use crate::errors::AppError;
use crate::middlewares::AuthMiddleware;
use crate::services::courses::CourseService;

/// 공개된 강의 목록
#[get("/courses")]
pub async fn list_courses() -> Result<HttpResponse, AppError> {
    let courses = CourseService::instance().list_published().await?;
    Ok(HttpResponse::Ok().json(courses))
}

#[post("/course", wrap = "AuthMiddleware::instructor()")]
pub async fn create_course(
    user: AuthenticatedUser,
    payload: web::Json<CreateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let course = CourseService::instance()
        .create(&user.object_id()?, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(course))
}

#[put("/course/publish/{slug}", wrap = "AuthMiddleware::instructor()")]
pub async fn publish_course(
    user: AuthenticatedUser,
    slug: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let course = CourseService::instance()
        .set_published(&slug, &user.object_id()?, true)
        .await?;

    Ok(HttpResponse::Ok().json(course))
}

#[put("/course/unpublish/{slug}", wrap = "AuthMiddleware::instructor()")]
pub async fn unpublish_course(
    user: AuthenticatedUser,
    slug: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let course = CourseService::instance()
        .set_published(&slug, &user.object_id()?, false)
        .await?;

    Ok(HttpResponse::Ok().json(course))
}

/// 강의 부분 수정 (slug는 유지)
#[put("/course/{slug}", wrap = "AuthMiddleware::instructor()")]
pub async fn update_course(
    user: AuthenticatedUser,
    slug: web::Path<String>,
    payload: web::Json<UpdateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let course = CourseService::instance()
        .update(&slug, &user.object_id()?, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(course))
}

#[get("/course/{slug}")]
pub async fn read_course(slug: web::Path<String>) -> Result<HttpResponse, AppError> {
    let course = CourseService::instance().get_by_slug(&slug).await?;
    Ok(HttpResponse::Ok().json(course))
}

/// 수강생용 강의 상세. 수강 중이 아니면 403.
#[get("/user/course/{slug}", wrap = "AuthMiddleware::required()")]
pub async fn read_enrolled_course(
    user: AuthenticatedUser,
    slug: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let course = CourseService::instance()
        .get_for_student(&slug, &user.object_id()?)
        .await?;

    Ok(HttpResponse::Ok().json(course))
}
