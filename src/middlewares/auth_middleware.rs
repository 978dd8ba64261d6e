//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 JWT 토큰을 검증하고 사용자 정보를 추출합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::entities::users::user::Role;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
///
/// 유효한 토큰이 없으면 401. `required_role`이 있으면 저장된 사용자 문서의
/// 역할도 확인합니다.
pub struct AuthMiddleware {
    required_role: Option<Role>,
}

impl AuthMiddleware {
    /// 로그인만 확인
    pub fn required() -> Self {
        Self { required_role: None }
    }

    pub fn required_with_role(role: Role) -> Self {
        Self {
            required_role: Some(role),
        }
    }

    /// 로그인 + 강사 역할
    pub fn instructor() -> Self {
        Self::required_with_role(Role::Instructor)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            required_role: self.required_role,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CookieConfig;
    use crate::domain::auth::authenticated_user::AuthenticatedUser;
    use crate::services::auth::TokenService;
    use actix_web::cookie::Cookie;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id)
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let app = test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(AuthMiddleware::required())
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/me").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_invalid_bearer_token_is_unauthorized() {
        let app = test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(AuthMiddleware::required())
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_token_cookie_passes() {
        let user_id = "64b7f0c2a1b2c3d4e5f60718";
        // JWT_SECRET 없는 운영 설정에서는 토큰을 발급하지 않음
        let Ok(token) = TokenService::instance().generate_token(user_id) else {
            return;
        };

        let app = test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(AuthMiddleware::required())
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/me")
            .cookie(Cookie::new(CookieConfig::TOKEN_COOKIE, token))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body, user_id.as_bytes());
    }

    #[actix_web::test]
    async fn test_role_requirements() {
        assert_eq!(AuthMiddleware::required().required_role, None);
        assert_eq!(AuthMiddleware::instructor().required_role, Some(Role::Instructor));
    }
}
