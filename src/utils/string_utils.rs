//! # 문자열 유틸리티
//!
//! 문자열 처리와 관련된 공통 유틸리티 함수들입니다.

use base64::{engine::general_purpose::STANDARD, Engine};
use mongodb::bson::oid::ObjectId;

use crate::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(validate_required_string("  Hello  ", "name").unwrap(), "Hello");
/// assert!(validate_required_string("   ", "name").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!(
            "{}은(는) 필수입니다",
            field_name
        )));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// URL용 slug 생성
///
/// 영문자와 숫자는 소문자로 남기고, 그 외 문자의 연속은 `-` 하나로 바꿉니다.
/// 한글 등 유니코드 문자(`char::is_alphanumeric`)도 그대로 유지합니다.
///
/// ```rust,ignore
/// assert_eq!(slugify("React for Beginners!"), "react-for-beginners");
/// ```
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.trim().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c == '\'' || c == '"' {
            continue;
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// `data:<mime>;base64,<payload>` 형식의 업로드 본문
#[derive(Debug, Clone, PartialEq)]
pub struct DataUrl {
    /// 예: `image/png`
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DataUrl {
    /// MIME 하위 타입을 파일 확장자로 사용합니다. (`image/jpeg` → `jpeg`)
    pub fn extension(&self) -> &str {
        self.mime_type
            .split_once('/')
            .map(|(_, sub)| sub)
            .unwrap_or("bin")
    }
}

/// base64 data URL을 디코딩합니다.
///
/// # Errors
///
/// * `AppError::ValidationError` - 형식이 잘못되었거나 base64 디코딩에 실패한 경우
pub fn parse_data_url(value: &str) -> Result<DataUrl, AppError> {
    let invalid = || AppError::ValidationError("잘못된 data URL 형식입니다".to_string());

    let rest = value.trim().strip_prefix("data:").ok_or_else(invalid)?;
    let (meta, payload) = rest.split_once(',').ok_or_else(invalid)?;
    let mime_type = meta.strip_suffix(";base64").ok_or_else(invalid)?;

    if mime_type.is_empty() || !mime_type.contains('/') {
        return Err(invalid());
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| AppError::ValidationError(format!("base64 디코딩 실패: {}", e)))?;

    if bytes.is_empty() {
        return Err(AppError::ValidationError("업로드할 데이터가 비어 있습니다".to_string()));
    }

    Ok(DataUrl {
        mime_type: mime_type.to_lowercase(),
        bytes,
    })
}

/// 비밀번호 재설정용 6자리 대문자 코드
pub fn generate_reset_code() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..6].to_uppercase()
}

/// 경로/본문의 id 문자열을 ObjectId로 변환합니다.
pub fn parse_object_id(value: &str, field_name: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(value.trim())
        .map_err(|_| AppError::ValidationError(format!("잘못된 {} 형식입니다: {}", field_name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("  Hello  ", "name").unwrap(), "Hello");
        assert!(validate_required_string("   ", "name").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  Web ".into())), Some("Web".into()));
        assert_eq!(clean_optional_string(Some("   ".into())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("React for Beginners!"), "react-for-beginners");
        assert_eq!(slugify("  Node.js & MongoDB  "), "node-js-mongodb");
        assert_eq!(slugify("Don't Stop"), "dont-stop");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify("Rust 2024 Edition"), "rust-2024-edition");
    }

    #[test]
    fn test_parse_data_url() {
        let data_url = parse_data_url("data:image/png;base64,aGVsbG8=").unwrap();

        assert_eq!(data_url.mime_type, "image/png");
        assert_eq!(data_url.extension(), "png");
        assert_eq!(data_url.bytes, b"hello");
    }

    #[test]
    fn test_parse_data_url_rejects_garbage() {
        assert!(parse_data_url("image/png;base64,aGVsbG8=").is_err());
        assert!(parse_data_url("data:image/png,aGVsbG8=").is_err());
        assert!(parse_data_url("data:image/png;base64,@@@").is_err());
        assert!(parse_data_url("data:;base64,aGVsbG8=").is_err());
    }

    #[test]
    fn test_generate_reset_code() {
        let code = generate_reset_code();

        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_parse_object_id() {
        assert!(parse_object_id("64b7f0c2a1b2c3d4e5f60718", "courseId").is_ok());
        assert!(matches!(
            parse_object_id("nope", "courseId"),
            Err(AppError::ValidationError(_))
        ));
    }
}
