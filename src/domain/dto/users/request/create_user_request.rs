//! 회원가입 요청 DTO

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(
        min = 6,
        max = 64,
        message = "비밀번호는 6자 이상 64자 이하여야 합니다"
    ))]
    pub password: String,
}

impl RegisterRequest {
    /// 이름은 앞뒤 공백을 제거하고 이메일은 소문자로 정규화합니다.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password,
        }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("name_required")
            .with_message("이름을 입력해주세요".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("Ryan", "ryan@example.com", "secret1").validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let errors = request("   ", "ryan@example.com", "secret1").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_short_password_rejected() {
        let errors = request("Ryan", "ryan@example.com", "12345").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let errors = request("Ryan", "not-an-email", "secret1").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_normalized() {
        let normalized = request("  Ryan ", " Ryan@Example.COM ", "secret1").normalized();
        assert_eq!(normalized.name, "Ryan");
        assert_eq!(normalized.email, "ryan@example.com");
    }
}
