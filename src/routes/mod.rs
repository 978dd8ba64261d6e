//! API 라우트 설정 모듈
//!
//! 모든 API는 `/api` 아래에 등록됩니다. 인증 수준은 각 핸들러의
//! `wrap` 속성으로 지정되어 있으므로 여기서는 등록 순서만 관리합니다.
//!
//! # Route Order
//!
//! actix-web은 등록 순서대로 경로를 비교합니다. 고정 세그먼트를 가진 경로
//! (`/course/publish/{slug}`)를 같은 길이의 가변 경로(`/course/{slug}/{lesson_id}`)보다
//! 먼저 등록해야 합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::config::ServerConfig;
use crate::handlers;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    cfg.service(
        web::scope("/api")
            .app_data(web::PayloadConfig::new(ServerConfig::video_upload_limit_bytes()))
            .configure(configure_auth_routes)
            .configure(configure_course_routes)
            .configure(configure_enrollment_routes)
            .configure(configure_instructor_routes),
    );
}

/// 회원가입, 로그인, 비밀번호 재설정
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::register)
        .service(handlers::auth::login)
        .service(handlers::auth::logout)
        .service(handlers::auth::current_user)
        .service(handlers::auth::forgot_password)
        .service(handlers::auth::reset_password)
        .service(handlers::auth::csrf_token);
}

/// 강의, 레슨, 미디어
fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::media::upload_image)
        .service(handlers::media::remove_image)
        .service(handlers::media::upload_video)
        .service(handlers::media::remove_video)
        .service(handlers::courses::list_courses)
        .service(handlers::courses::create_course)
        .service(handlers::courses::publish_course)
        .service(handlers::courses::unpublish_course)
        .service(handlers::lessons::add_lesson)
        .service(handlers::lessons::update_lesson)
        .service(handlers::lessons::remove_lesson)
        .service(handlers::courses::update_course)
        .service(handlers::courses::read_course)
        .service(handlers::courses::read_enrolled_course);
}

/// 수강 신청과 진도
fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::enrollment::check_enrollment)
        .service(handlers::enrollment::free_enrollment)
        .service(handlers::enrollment::paid_enrollment)
        .service(handlers::enrollment::stripe_success)
        .service(handlers::enrollment::user_courses)
        .service(handlers::completion::mark_completed)
        .service(handlers::completion::mark_incompleted)
        .service(handlers::completion::list_completed);
}

/// 강사 온보딩과 대시보드
fn configure_instructor_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::instructor::make_instructor)
        .service(handlers::instructor::get_account_status)
        .service(handlers::instructor::current_instructor)
        .service(handlers::instructor::instructor_courses)
        .service(handlers::instructor::student_count)
        .service(handlers::instructor::instructor_balance)
        .service(handlers::instructor::payout_settings);
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8000/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "edemy_backend",
///   "version": "0.1.0",
///   "timestamp": "2023-01-01T00:00:00Z",
///   "features": { "database": "MongoDB", "cache": "Redis", ... }
/// }
/// ```
#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "storage": "S3",
            "email": "SES",
            "payments": "Stripe Connect"
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "edemy_backend");
    }

    #[actix_web::test]
    async fn test_protected_route_requires_token() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/api/user-courses").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_instructor_route_requires_token() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::put()
            .uri("/api/course/publish/rust-web")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
