//! 결제 프로세서(Stripe) 연동 서비스
//!
//! Connect Express 계정 온보딩, 잔액/로그인 링크 조회, 체크아웃 세션 생성과
//! 조회를 담당합니다. 모든 요청은 form 인코딩 본문과 Bearer 시크릿 키를 사용합니다.

use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;

use crate::config::StripeConfig;
use crate::core::registry::{Service, ServiceLocator, ServiceRegistration};
use crate::domain::models::payments::{
    AccountLink, Balance, CheckoutRequest, CheckoutSession, ConnectedAccount, LoginLink,
    StripeErrorBody,
};
use crate::errors::{AppError, AppResult};

static PAYMENT_SERVICE: OnceCell<Arc<PaymentService>> = OnceCell::new();

/// 가격(달러)을 최소 통화 단위(센트)로 변환합니다.
pub fn price_to_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

/// 플랫폼 수수료(센트)
pub fn platform_fee_cents(price: f64, fee_percent: f64) -> i64 {
    (price * fee_percent / 100.0 * 100.0).round() as i64
}

/// 체크아웃 세션 생성 form 파라미터
pub fn checkout_session_form(request: &CheckoutRequest) -> Vec<(String, String)> {
    vec![
        ("mode".into(), "payment".into()),
        ("line_items[0][price_data][currency]".into(), request.currency.clone()),
        (
            "line_items[0][price_data][product_data][name]".into(),
            request.product_name.clone(),
        ),
        (
            "line_items[0][price_data][unit_amount]".into(),
            request.unit_amount.to_string(),
        ),
        ("line_items[0][quantity]".into(), "1".into()),
        (
            "payment_intent_data[application_fee_amount]".into(),
            request.application_fee_amount.to_string(),
        ),
        (
            "payment_intent_data[transfer_data][destination]".into(),
            request.destination.clone(),
        ),
        ("client_reference_id".into(), request.client_reference_id.clone()),
        ("success_url".into(), request.success_url.clone()),
        ("cancel_url".into(), request.cancel_url.clone()),
    ]
}

/// 온보딩 링크 URL 뒤에 링크 필드를 쿼리 문자열로 붙입니다. (키 이름순)
pub fn onboarding_redirect_url(link: &AccountLink) -> String {
    let query = [
        ("created", link.created.to_string()),
        ("expires_at", link.expires_at.to_string()),
        ("object", link.object.clone()),
        ("url", link.url.clone()),
    ]
    .iter()
    .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
    .collect::<Vec<_>>()
    .join("&");

    format!("{}?{}", link.url, query)
}

pub struct PaymentService {
    http: Arc<reqwest::Client>,
}

impl PaymentService {
    pub fn instance() -> Arc<Self> {
        PAYMENT_SERVICE
            .get_or_init(|| {
                Arc::new(Self {
                    http: ServiceLocator::get::<reqwest::Client>(),
                })
            })
            .clone()
    }

    fn url(path: &str) -> String {
        format!("{}{}", StripeConfig::api_base().trim_end_matches('/'), path)
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<StripeErrorBody>().await {
                Ok(body) => body.error.message.unwrap_or_else(|| {
                    body.error.error_type.unwrap_or_else(|| "unknown error".to_string())
                }),
                Err(_) => "unknown error".to_string(),
            };
            warn!("⚠️ Stripe 응답 오류 {}: {}", status, message);
            return Err(AppError::ExternalServiceError(format!(
                "결제 요청 실패 ({}): {}",
                status, message
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("결제 응답 파싱 실패: {}", e)))
    }

    async fn post_form<T: DeserializeOwned>(&self, path: &str, form: &[(String, String)]) -> AppResult<T> {
        let response = self
            .http
            .post(Self::url(path))
            .bearer_auth(StripeConfig::secret_key()?)
            .form(form)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("결제 요청 실패: {}", e)))?;

        Self::parse(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, connected_account: Option<&str>) -> AppResult<T> {
        let mut request = self
            .http
            .get(Self::url(path))
            .bearer_auth(StripeConfig::secret_key()?);

        if let Some(account) = connected_account {
            request = request.header("Stripe-Account", account);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("결제 요청 실패: {}", e)))?;

        Self::parse(response).await
    }

    pub async fn create_express_account(&self, email: &str) -> AppResult<ConnectedAccount> {
        let account: ConnectedAccount = self
            .post_form(
                "/accounts",
                &[
                    ("type".to_string(), "express".to_string()),
                    ("email".to_string(), email.to_string()),
                ],
            )
            .await?;

        info!("✅ Stripe 연결 계정 생성: {}", account.id);
        Ok(account)
    }

    pub async fn create_account_link(&self, account_id: &str, redirect_url: &str) -> AppResult<AccountLink> {
        self.post_form(
            "/account_links",
            &[
                ("account".to_string(), account_id.to_string()),
                ("refresh_url".to_string(), redirect_url.to_string()),
                ("return_url".to_string(), redirect_url.to_string()),
                ("type".to_string(), "account_onboarding".to_string()),
            ],
        )
        .await
    }

    pub async fn retrieve_account(&self, account_id: &str) -> AppResult<ConnectedAccount> {
        self.get(&format!("/accounts/{}", urlencoding::encode(account_id)), None)
            .await
    }

    pub async fn retrieve_balance(&self, account_id: &str) -> AppResult<Balance> {
        self.get("/balance", Some(account_id)).await
    }

    pub async fn create_login_link(&self, account_id: &str) -> AppResult<LoginLink> {
        self.post_form(
            &format!("/accounts/{}/login_links", urlencoding::encode(account_id)),
            &[],
        )
        .await
    }

    pub async fn create_checkout_session(&self, request: &CheckoutRequest) -> AppResult<CheckoutSession> {
        let session: CheckoutSession = self
            .post_form("/checkout/sessions", &checkout_session_form(request))
            .await?;

        info!("💳 체크아웃 세션 생성: {}", session.id);
        Ok(session)
    }

    pub async fn retrieve_checkout_session(&self, session_id: &str) -> AppResult<CheckoutSession> {
        self.get(
            &format!("/checkout/sessions/{}", urlencoding::encode(session_id)),
            None,
        )
        .await
    }
}

#[async_trait]
impl Service for PaymentService {
    fn name(&self) -> &str {
        "payment"
    }
}

fn construct_payment_service() -> Arc<dyn Service> {
    PaymentService::instance()
}

inventory::submit! {
    ServiceRegistration {
        name: "payment_service",
        constructor: construct_payment_service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_to_cents() {
        assert_eq!(price_to_cents(9.99), 999);
        assert_eq!(price_to_cents(19.95), 1995);
        assert_eq!(price_to_cents(0.0), 0);
    }

    #[test]
    fn test_platform_fee_cents() {
        assert_eq!(platform_fee_cents(9.99, 30.0), 300);
        assert_eq!(platform_fee_cents(100.0, 30.0), 3000);
        assert_eq!(platform_fee_cents(10.0, 0.0), 0);
    }

    #[test]
    fn test_checkout_session_form() {
        let form = checkout_session_form(&CheckoutRequest {
            product_name: "Rust Web".into(),
            currency: "usd".into(),
            unit_amount: 999,
            application_fee_amount: 300,
            destination: "acct_123".into(),
            client_reference_id: "64b7f0c2a1b2c3d4e5f60718".into(),
            success_url: "http://localhost:3000/stripe/success/abc".into(),
            cancel_url: "http://localhost:3000/stripe/cancel".into(),
        });

        let get = |key: &str| form.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str());

        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("999"));
        assert_eq!(get("line_items[0][price_data][product_data][name]"), Some("Rust Web"));
        assert_eq!(get("line_items[0][quantity]"), Some("1"));
        assert_eq!(get("payment_intent_data[application_fee_amount]"), Some("300"));
        assert_eq!(get("payment_intent_data[transfer_data][destination]"), Some("acct_123"));
        assert_eq!(get("client_reference_id"), Some("64b7f0c2a1b2c3d4e5f60718"));
    }

    #[test]
    fn test_onboarding_redirect_url() {
        let link = AccountLink {
            object: "account_link".into(),
            created: 1700000000,
            expires_at: 1700000300,
            url: "https://connect.stripe.com/setup/e/acct_1/abc".into(),
        };

        assert_eq!(
            onboarding_redirect_url(&link),
            "https://connect.stripe.com/setup/e/acct_1/abc?created=1700000000&expires_at=1700000300\
             &object=account_link&url=https%3A%2F%2Fconnect.stripe.com%2Fsetup%2Fe%2Facct_1%2Fabc"
        );
    }
}
