//! 비밀번호 찾기/재설정 요청 DTO

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "재설정 코드를 입력해주세요"))]
    pub code: String,

    #[serde(rename = "newPassword")]
    #[validate(length(
        min = 6,
        max = 64,
        message = "비밀번호는 6자 이상 64자 이하여야 합니다"
    ))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_request_uses_camel_case_password() {
        let request: ResetPasswordRequest = serde_json::from_str(
            r#"{"email": "ryan@example.com", "code": "A1B2C3", "newPassword": "secret1"}"#,
        )
        .unwrap();

        assert_eq!(request.new_password, "secret1");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_code_rejected() {
        let request = ResetPasswordRequest {
            email: "ryan@example.com".into(),
            code: String::new(),
            new_password: "secret1".into(),
        };

        assert!(request.validate().is_err());
    }
}
