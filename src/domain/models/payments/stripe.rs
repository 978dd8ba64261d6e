//! Stripe REST 응답 구조체
//!
//! 필요한 필드만 선언하고 나머지는 무시합니다.

use serde::{Deserialize, Serialize};

/// Connect 계정 스냅샷. `users.stripe_seller`에 그대로 저장됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectedAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_currency: Option<String>,
    #[serde(default)]
    pub charges_enabled: bool,
    #[serde(default)]
    pub payouts_enabled: bool,
    #[serde(default)]
    pub details_submitted: bool,
}

/// 온보딩 링크
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountLink {
    pub object: String,
    pub created: i64,
    pub expires_at: i64,
    pub url: String,
}

/// Express 대시보드 로그인 링크
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginLink {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceAmount {
    pub amount: i64,
    pub currency: String,
}

/// 연결 계정 잔액
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    #[serde(default)]
    pub available: Vec<BalanceAmount>,
    #[serde(default)]
    pub pending: Vec<BalanceAmount>,
    #[serde(default)]
    pub livemode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    /// `paid` | `unpaid` | `no_payment_required`
    #[serde(default)]
    pub payment_status: String,
    /// 세션 생성 시 넘긴 강의 id
    #[serde(default)]
    pub client_reference_id: Option<String>,
}

impl CheckoutSession {
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }
}

/// 체크아웃 세션 생성에 필요한 값
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub product_name: String,
    pub currency: String,
    pub unit_amount: i64,
    pub application_fee_amount: i64,
    pub destination: String,
    pub client_reference_id: String,
    pub success_url: String,
    pub cancel_url: String,
}

/// Stripe 에러 응답 `{"error": {"message": ...}}`
#[derive(Debug, Deserialize)]
pub struct StripeErrorBody {
    pub error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct StripeErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_account_ignores_unknown_fields() {
        let json = r#"{
            "id": "acct_123",
            "object": "account",
            "type": "express",
            "charges_enabled": true,
            "capabilities": {"transfers": "active"}
        }"#;

        let account: ConnectedAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.id, "acct_123");
        assert_eq!(account.account_type.as_deref(), Some("express"));
        assert!(account.charges_enabled);
        assert!(!account.payouts_enabled);
    }

    #[test]
    fn test_checkout_session_paid() {
        let session: CheckoutSession =
            serde_json::from_str(r#"{"id": "cs_1", "payment_status": "paid"}"#).unwrap();
        assert!(session.is_paid());

        let session: CheckoutSession =
            serde_json::from_str(r#"{"id": "cs_2", "payment_status": "unpaid", "url": null}"#).unwrap();
        assert!(!session.is_paid());
    }
}
