//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use mongodb::bson::oid::ObjectId;

use crate::config::CookieConfig;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::entities::users::user::Role;
use crate::errors::{AppError, AppResult};
use crate::services::auth::TokenService;
use crate::services::users::UserService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub required_role: Option<Role>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let required_role = self.required_role;

        Box::pin(async move {
            let user = match extract_user_from_request(&req) {
                Ok(user) => user,
                Err(err) => {
                    log::warn!("🔒 인증 실패: {}", err);
                    return Ok(reject(req, err));
                }
            };

            if let Some(required) = required_role {
                if let Err(err) = check_role(&user, required).await {
                    log::warn!("🚫 권한 부족: 사용자 ID {} ({:?})", user.user_id, required);
                    return Ok(reject(req, err));
                }
            }

            log::debug!("인증 성공: 사용자 ID {}", user.user_id);
            req.extensions_mut().insert(user);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// 쿠키/헤더에서 JWT를 꺼내 검증합니다.
fn extract_user_from_request(req: &ServiceRequest) -> AppResult<AuthenticatedUser> {
    let cookie = req.cookie(CookieConfig::TOKEN_COOKIE);
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = TokenService::resolve_token(cookie.as_ref().map(|c| c.value()), auth_header)
        .ok_or_else(|| AppError::AuthenticationError("인증 토큰이 없습니다".to_string()))?;

    let claims = TokenService::instance().verify_token(&token)?;

    Ok(AuthenticatedUser::new(claims.user_id))
}

/// 역할은 토큰이 아니라 저장된 사용자 문서로 확인합니다.
async fn check_role(user: &AuthenticatedUser, required: Role) -> AppResult<()> {
    let user_id: ObjectId = user.object_id()?;
    let stored = UserService::instance().ensure_exists(&user_id).await?;

    if !stored.has_role(required) {
        return Err(AppError::AuthorizationError("접근 권한이 부족합니다".to_string()));
    }

    Ok(())
}
