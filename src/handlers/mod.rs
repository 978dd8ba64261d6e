//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다. 핸들러는 요청 본문 검증과
//! 쿠키/헤더 처리만 하고, 실제 작업은 싱글톤 서비스에 맡깁니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                     ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 인증이 필요한 엔드포인트는 라우트 매크로의 `wrap` 속성으로
//! `AuthMiddleware`를 직접 붙입니다.
//!
//! ```rust,ignore
//! #[post("/course", wrap = "AuthMiddleware::instructor()")]
//! pub async fn create_course(
//!     user: AuthenticatedUser,
//!     payload: web::Json<CreateCourseRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate()?;
//!     let course = CourseService::instance()
//!         .create(&user.object_id()?, payload.into_inner())
//!         .await?;
//!     Ok(HttpResponse::Ok().json(course))
//! }
//! ```
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 회원가입, 로그인/로그아웃, 비밀번호 재설정, CSRF 토큰
//! - **`courses`**: 강의 목록/상세/작성/공개
//! - **`lessons`**: 레슨 추가/수정/삭제
//! - **`media`**: 강의 이미지, 레슨 동영상 업로드/삭제
//! - **`enrollment`**: 수강 신청, 결제 확인, 내 강의
//! - **`completion`**: 레슨 완료 표시
//! - **`instructor`**: 강사 온보딩, 대시보드

pub mod auth;
pub mod courses;
pub mod lessons;
pub mod media;
pub mod enrollment;
pub mod completion;
pub mod instructor;

use actix_web::HttpResponse;
use serde_json::json;

/// `{"ok": true}`
pub(crate) fn ok_body() -> serde_json::Value {
    json!({ "ok": true })
}

/// 본문이 JSON 문자열 하나(`"cs_..."`, `"https://..."`)인 200 응답
pub(crate) fn string_response(value: &str) -> HttpResponse {
    HttpResponse::Ok().json(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_string_response_is_bare_json_string() {
        let response = string_response("cs_test_123");
        assert!(response.status().is_success());

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        assert_eq!(&body[..], br#""cs_test_123""#);

        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(value.is_string());
    }

    #[test]
    fn test_ok_body() {
        assert_eq!(ok_body().to_string(), r#"{"ok":true}"#);
    }
}
