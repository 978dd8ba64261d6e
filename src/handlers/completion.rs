//! 레슨 완료 표시 핸들러

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::enrollment::{CourseIdRequest, MarkCompletedRequest};
use crate::errors::AppError;
use crate::handlers::ok_body;
use crate::middlewares::AuthMiddleware;
use crate::services::enrollment::CompletionService;
use crate::utils::string_utils::parse_object_id;

#[post("/mark-completed", wrap = "AuthMiddleware::required()")]
pub async fn mark_completed(
    user: AuthenticatedUser,
    payload: web::Json<MarkCompletedRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let course_id = parse_object_id(&payload.course_id, "강의 id")?;

    CompletionService::instance()
        .mark_completed(&user.object_id()?, &course_id, &payload.lesson_id)
        .await?;

    Ok(HttpResponse::Ok().json(ok_body()))
}

#[post("/mark-incompleted", wrap = "AuthMiddleware::required()")]
pub async fn mark_incompleted(
    user: AuthenticatedUser,
    payload: web::Json<MarkCompletedRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let course_id = parse_object_id(&payload.course_id, "강의 id")?;

    CompletionService::instance()
        .mark_incomplete(&user.object_id()?, &course_id, &payload.lesson_id)
        .await?;

    Ok(HttpResponse::Ok().json(ok_body()))
}

/// 완료한 레슨 id 목록
#[post("/list-completed", wrap = "AuthMiddleware::required()")]
pub async fn list_completed(
    user: AuthenticatedUser,
    payload: web::Json<CourseIdRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let course_id = parse_object_id(&payload.course_id, "강의 id")?;

    let lessons = CompletionService::instance()
        .list_completed(&user.object_id()?, &course_id)
        .await?;

    Ok(HttpResponse::Ok().json(lessons))
}
