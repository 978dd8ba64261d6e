//! 이메일 발송 서비스 (SES query API)
//!
//! `Action=SendEmail` 요청을 form 본문으로 만들어 Signature V4(`ses`)로 서명합니다.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use once_cell::sync::OnceCell;

use crate::config::{EmailConfig, StorageConfig};
use crate::core::registry::{Service, ServiceLocator, ServiceRegistration};
use crate::errors::{AppError, AppResult};
use crate::services::integrations::sigv4::{sha256_hex, SigV4Signer, SignableRequest};

static EMAIL_SERVICE: OnceCell<Arc<EmailService>> = OnceCell::new();

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// 발송할 메일 한 통
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

impl EmailMessage {
    /// SES `SendEmail` 파라미터. 회신 주소는 발신자와 같습니다.
    pub fn to_form_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Action", "SendEmail".to_string()),
            ("Version", "2010-12-01".to_string()),
            ("Source", self.from.clone()),
            ("Destination.ToAddresses.member.1", self.to.clone()),
            ("ReplyToAddresses.member.1", self.from.clone()),
            ("Message.Subject.Charset", "UTF-8".to_string()),
            ("Message.Subject.Data", self.subject.clone()),
            ("Message.Body.Html.Charset", "UTF-8".to_string()),
            ("Message.Body.Html.Data", self.html_body.clone()),
        ]
    }
}

/// form 파라미터를 `application/x-www-form-urlencoded` 본문으로 직렬화합니다.
pub fn encode_form(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

pub struct EmailService {
    http: Arc<reqwest::Client>,
}

impl EmailService {
    pub fn instance() -> Arc<Self> {
        EMAIL_SERVICE
            .get_or_init(|| {
                Arc::new(Self {
                    http: ServiceLocator::get::<reqwest::Client>(),
                })
            })
            .clone()
    }

    /// 비밀번호 재설정 코드 메일
    pub fn password_reset_message(from: &str, to: &str, code: &str, app_name: &str) -> EmailMessage {
        EmailMessage {
            from: from.to_string(),
            to: to.to_string(),
            subject: format!("{} 비밀번호 재설정", app_name),
            html_body: format!(
                "<html><body>\
                 <h1>비밀번호 재설정</h1>\
                 <p>아래 코드를 입력하여 비밀번호를 재설정하세요.</p>\
                 <h2 style=\"color:red;\">{}</h2>\
                 <i>{}</i>\
                 </body></html>",
                code, app_name
            ),
        }
    }

    pub async fn send_password_reset(&self, to: &str, code: &str) -> AppResult<()> {
        let from = EmailConfig::from_address()?;
        let message = Self::password_reset_message(&from, to, code, &EmailConfig::app_name());
        self.send(&message).await
    }

    pub async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        let credentials = StorageConfig::credentials()?;
        let region = EmailConfig::region();
        let host = format!("email.{}.amazonaws.com", region);
        let body = encode_form(&message.to_form_params());

        let signable = SignableRequest {
            method: "POST".to_string(),
            host: host.clone(),
            path: "/".to_string(),
            query: Vec::new(),
            headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
            payload_hash: sha256_hex(body.as_bytes()),
        };
        let auth_headers = SigV4Signer::new(&credentials, &region, "ses").sign(&signable, Utc::now())?;

        let mut request = self
            .http
            .post(format!("https://{}/", host))
            .header("content-type", FORM_CONTENT_TYPE)
            .body(body);
        for (name, value) in &auth_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("이메일 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("⚠️ 이메일 발송 실패 {}: {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "이메일 발송 실패 ({})",
                status
            )));
        }

        info!("📧 이메일 발송 완료: {}", message.to);
        Ok(())
    }
}

#[async_trait]
impl Service for EmailService {
    fn name(&self) -> &str {
        "email"
    }
}

fn construct_email_service() -> Arc<dyn Service> {
    EmailService::instance()
}

inventory::submit! {
    ServiceRegistration {
        name: "email_service",
        constructor: construct_email_service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_params() {
        let message = EmailService::password_reset_message(
            "noreply@edemy.app",
            "ryan@example.com",
            "A1B2C3",
            "Edemy",
        );
        let params = message.to_form_params();

        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("Action"), Some("SendEmail"));
        assert_eq!(get("Destination.ToAddresses.member.1"), Some("ryan@example.com"));
        assert_eq!(get("ReplyToAddresses.member.1"), Some("noreply@edemy.app"));
        assert!(get("Message.Body.Html.Data").unwrap().contains("A1B2C3"));
    }

    #[test]
    fn test_encode_form() {
        let body = encode_form(&[
            ("Source", "a@b.c".to_string()),
            ("Message.Subject.Data", "hi there & bye".to_string()),
        ]);

        assert_eq!(body, "Source=a%40b.c&Message.Subject.Data=hi%20there%20%26%20bye");
    }
}
