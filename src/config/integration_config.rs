//! 외부 연동(오브젝트 스토리지, 이메일, 결제) 설정
//!
//! 자격 증명은 호출 시점에 읽으며, 누락되면 `AppError::InternalError`를 돌려줍니다.
//! 서버는 연동 설정 없이도 기동되고, 해당 기능을 호출할 때만 실패합니다.

use std::env;

use super::{parsed_var, required_var};
use crate::errors::AppResult;

/// AWS 자격 증명
#[derive(Debug, Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

/// S3 호환 오브젝트 스토리지 설정
pub struct StorageConfig;

impl StorageConfig {
    pub fn credentials() -> AppResult<AwsCredentials> {
        Ok(AwsCredentials {
            access_key_id: required_var("AWS_ACCESS_KEY_ID")?,
            secret_access_key: required_var("AWS_SECRET_ACCESS_KEY")?,
            session_token: env::var("AWS_SESSION_TOKEN").ok().filter(|t| !t.is_empty()),
        })
    }

    pub fn region() -> String {
        env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string())
    }

    pub fn bucket() -> String {
        env::var("AWS_S3_BUCKET").unwrap_or_else(|_| "edemy-bucket".to_string())
    }
}

/// 이메일(SES) 설정
pub struct EmailConfig;

impl EmailConfig {
    pub fn from_address() -> AppResult<String> {
        required_var("EMAIL_FROM")
    }

    pub fn region() -> String {
        env::var("AWS_SES_REGION").unwrap_or_else(|_| StorageConfig::region())
    }

    pub fn app_name() -> String {
        env::var("APP_NAME").unwrap_or_else(|_| "Edemy".to_string())
    }
}

/// Stripe 결제 설정
pub struct StripeConfig;

impl StripeConfig {
    pub fn secret_key() -> AppResult<String> {
        required_var("STRIPE_SECRET_KEY")
    }

    pub fn api_base() -> String {
        env::var("STRIPE_API_BASE").unwrap_or_else(|_| "https://api.stripe.com/v1".to_string())
    }

    /// 온보딩 링크의 refresh/return URL
    pub fn redirect_url() -> AppResult<String> {
        required_var("STRIPE_REDIRECT_URL")
    }

    /// 결제 성공 시 돌아올 URL. 실제 URL은 `<값>/<courseId>`.
    pub fn success_url() -> AppResult<String> {
        required_var("STRIPE_SUCCESS_URL")
    }

    pub fn cancel_url() -> AppResult<String> {
        required_var("STRIPE_CANCEL_URL")
    }

    /// 로그인 링크 생성 후 강사가 돌아갈 설정 화면 URL
    pub fn settings_redirect() -> Option<String> {
        env::var("STRIPE_SETTINGS_REDIRECT").ok().filter(|v| !v.is_empty())
    }

    /// 플랫폼 수수료(%) 기본 30
    pub fn platform_fee_percent() -> f64 {
        parsed_var("PLATFORM_FEE_PERCENT", 30.0)
    }

    pub fn currency() -> String {
        env::var("STRIPE_CURRENCY").unwrap_or_else(|_| "usd".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_fee_default() {
        if env::var("PLATFORM_FEE_PERCENT").is_err() {
            assert_eq!(StripeConfig::platform_fee_percent(), 30.0);
        }
        if env::var("STRIPE_CURRENCY").is_err() {
            assert_eq!(StripeConfig::currency(), "usd");
        }
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        if env::var("STRIPE_SECRET_KEY").is_err() {
            assert!(StripeConfig::secret_key().is_err());
        }
    }
}
