//! Authentication HTTP Handlers
//!
//! 이메일/비밀번호 인증을 처리합니다. 로그인에 성공하면 JWT를 http-only
//! `token` 쿠키로 내려주며, 이후 요청은 이 쿠키(또는 Bearer 헤더)로 인증합니다.
//!
//! - `POST /register`, `POST /login`, `GET /logout`
//! - `GET /current-user`
//! - `POST /forgot-password`, `POST /reset-password`
//! - `GET /csrf-token`

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{get, post, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::config::CookieConfig;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::users::{
    ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};
use crate::errors::AppError;
use crate::handlers::ok_body;
use crate::middlewares::AuthMiddleware;
use crate::services::auth::AuthService;
use crate::services::users::UserService;

/// 공통 속성을 가진 쿠키 (http-only, path `/`, SameSite=Lax)
pub(crate) fn build_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(CookieConfig::secure())
        .same_site(SameSite::Lax)
        .finish()
}

/// 회원가입
///
/// # Endpoint
/// `POST /register`
#[post("/register")]
pub async fn register(payload: web::Json<RegisterRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    UserService::instance().register(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ok_body()))
}

/// 로그인
///
/// 토큰은 `token` 쿠키로 설정하고 본문에는 비밀번호를 제외한 사용자 정보를 담습니다.
///
/// # Endpoint
/// `POST /login`
#[post("/login")]
pub async fn login(payload: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let result = AuthService::instance().login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .cookie(build_cookie(CookieConfig::TOKEN_COOKIE, result.token))
        .json(result.user))
}

/// 로그아웃: `token` 쿠키 제거
#[get("/logout")]
pub async fn logout() -> Result<HttpResponse, AppError> {
    let mut cookie = build_cookie(CookieConfig::TOKEN_COOKIE, String::new());
    cookie.make_removal();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "message": "Signed out successfully." })))
}

#[get("/current-user", wrap = "AuthMiddleware::required()")]
pub async fn current_user(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    UserService::instance().ensure_exists(&user.object_id()?).await?;

    Ok(HttpResponse::Ok().json(ok_body()))
}

/// 비밀번호 재설정 코드 발송
///
/// # Endpoint
/// `POST /forgot-password`
#[post("/forgot-password")]
pub async fn forgot_password(
    payload: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    AuthService::instance()
        .forgot_password(&payload.email.trim().to_lowercase())
        .await?;

    Ok(HttpResponse::Ok().json(ok_body()))
}

/// 코드 확인 후 비밀번호 변경
///
/// # Endpoint
/// `POST /reset-password`
#[post("/reset-password")]
pub async fn reset_password(
    payload: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let mut request = payload.into_inner();
    request.email = request.email.trim().to_lowercase();
    AuthService::instance().reset_password(request).await?;

    Ok(HttpResponse::Ok().json(ok_body()))
}

/// CSRF 토큰 발급
///
/// 같은 값을 `_csrf` 쿠키와 응답 본문 `csrfToken`으로 내려줍니다.
#[get("/csrf-token")]
pub async fn csrf_token() -> Result<HttpResponse, AppError> {
    let token = AuthService::instance().generate_csrf_token();

    Ok(HttpResponse::Ok()
        .cookie(build_cookie(CookieConfig::CSRF_COOKIE, token.clone()))
        .json(json!({ "csrfToken": token })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_build_cookie_attributes() {
        let cookie = build_cookie(CookieConfig::TOKEN_COOKIE, "abc".to_string());

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[actix_web::test]
    async fn test_logout_clears_token_cookie() {
        let app = test::init_service(App::new().service(logout)).await;

        let req = test::TestRequest::get().uri("/logout").to_request();
        let res = test::call_service(&app, req).await;

        assert!(res.status().is_success());
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == CookieConfig::TOKEN_COOKIE)
            .expect("token cookie");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age().map(|age| age.whole_seconds()), Some(0));

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Signed out successfully.");
    }

    #[actix_web::test]
    async fn test_register_rejects_short_password() {
        let app = test::init_service(App::new().service(register)).await;

        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(json!({ "name": "Ryan", "email": "ryan@example.com", "password": "123" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
