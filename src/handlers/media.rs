//! 강의 이미지 / 레슨 동영상 업로드 핸들러

use actix_web::http::header::CONTENT_TYPE;
use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::courses::{RemoveImageRequest, RemoveVideoRequest, UploadImageRequest};
use crate::errors::AppError;
use crate::handlers::ok_body;
use crate::middlewares::AuthMiddleware;
use crate::services::courses::MediaService;
use crate::utils::string_utils::parse_object_id;

/// `{image: "data:image/<ext>;base64,..."}`를 업로드하고 저장 위치를 반환합니다.
#[post("/course/upload-image", wrap = "AuthMiddleware::required()")]
pub async fn upload_image(payload: web::Json<UploadImageRequest>) -> Result<HttpResponse, AppError> {
    let stored = MediaService::instance()
        .upload_image(payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(stored))
}

#[post("/course/remove-image", wrap = "AuthMiddleware::required()")]
pub async fn remove_image(payload: web::Json<RemoveImageRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    MediaService::instance().remove_image(&payload.image).await?;

    Ok(HttpResponse::Ok().json(ok_body()))
}

/// 동영상 업로드
///
/// 요청 본문 전체가 동영상이며 `Content-Type: video/<ext>`가 필요합니다.
/// 본문 크기 제한은 라우트 설정의 `PayloadConfig`를 따릅니다.
#[post("/course/video-upload/{instructor_id}", wrap = "AuthMiddleware::instructor()")]
pub async fn upload_video(
    user: AuthenticatedUser,
    instructor_id: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let instructor_id = parse_object_id(&instructor_id, "강사 id")?;
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let stored = MediaService::instance()
        .upload_video(&instructor_id, &user.object_id()?, content_type, body.to_vec())
        .await?;

    Ok(HttpResponse::Ok().json(stored))
}

#[post("/course/video-remove/{instructor_id}", wrap = "AuthMiddleware::instructor()")]
pub async fn remove_video(
    user: AuthenticatedUser,
    instructor_id: web::Path<String>,
    payload: web::Json<RemoveVideoRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let instructor_id = parse_object_id(&instructor_id, "강사 id")?;

    MediaService::instance()
        .remove_video(&instructor_id, &user.object_id()?, &payload.video)
        .await?;

    Ok(HttpResponse::Ok().json(ok_body()))
}
