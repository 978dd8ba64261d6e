//! 레슨 HTTP 핸들러 (강사 전용)

use actix_web::{post, put, web, HttpResponse};
use validator::Validate;

use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::courses::{AddLessonRequest, UpdateLessonRequest};
use crate::errors::AppError;
use crate::handlers::ok_body;
use crate::middlewares::AuthMiddleware;
use crate::services::courses::CourseService;
use crate::utils::string_utils::parse_object_id;

/// 레슨 추가. 갱신된 강의를 반환합니다.
///
/// # Endpoint
/// `POST /course/lesson/{slug}/{instructor_id}`
#[post("/course/lesson/{slug}/{instructor_id}", wrap = "AuthMiddleware::instructor()")]
pub async fn add_lesson(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
    payload: web::Json<AddLessonRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let (slug, instructor_id) = path.into_inner();
    let instructor_id = parse_object_id(&instructor_id, "강사 id")?;

    let course = CourseService::instance()
        .add_lesson(&slug, &instructor_id, &user.object_id()?, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(course))
}

/// # Endpoint
/// `PUT /course/lesson/{slug}/{lesson_id}`
#[put("/course/lesson/{slug}/{lesson_id}", wrap = "AuthMiddleware::instructor()")]
pub async fn update_lesson(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateLessonRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let (slug, lesson_id) = path.into_inner();
    let lesson_id = parse_object_id(&lesson_id, "레슨 id")?;

    CourseService::instance()
        .update_lesson(&slug, &lesson_id, &user.object_id()?, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ok_body()))
}

/// 레슨 삭제 (동영상 객체 포함)
///
/// # Endpoint
/// `PUT /course/{slug}/{lesson_id}`
#[put("/course/{slug}/{lesson_id}", wrap = "AuthMiddleware::instructor()")]
pub async fn remove_lesson(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (slug, lesson_id) = path.into_inner();
    let lesson_id = parse_object_id(&lesson_id, "레슨 id")?;

    CourseService::instance()
        .remove_lesson(&slug, &lesson_id, &user.object_id()?)
        .await?;

    Ok(HttpResponse::Ok().json(ok_body()))
}
