//! 오브젝트 스토리지에 올라간 파일 참조
//!
//! 필드 이름은 스토리지 응답 형태(PascalCase)를 그대로 따릅니다. 프론트엔드는
//! 업로드 응답으로 받은 값을 삭제 요청에 그대로 돌려보냅니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StoredObject {
    #[serde(rename = "Bucket")]
    #[validate(length(min = 1, message = "버킷 이름이 필요합니다"))]
    pub bucket: String,

    #[serde(rename = "Key")]
    #[validate(length(min = 1, message = "오브젝트 키가 필요합니다"))]
    pub key: String,

    #[serde(rename = "Location", default)]
    pub location: String,

    #[serde(rename = "ETag", default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case_shape() {
        let object = StoredObject {
            bucket: "edemy-bucket".into(),
            key: "a.png".into(),
            location: "https://edemy-bucket.s3.us-east-1.amazonaws.com/a.png".into(),
            etag: Some("\"abc\"".into()),
        };

        let json = serde_json::to_value(&object).unwrap();
        assert_eq!(json["Bucket"], "edemy-bucket");
        assert_eq!(json["Key"], "a.png");
        assert_eq!(json["ETag"], "\"abc\"");
    }

    #[test]
    fn test_empty_key_rejected() {
        let object: StoredObject =
            serde_json::from_str(r#"{"Bucket": "edemy-bucket", "Key": ""}"#).unwrap();
        assert!(object.validate().is_err());
    }
}
