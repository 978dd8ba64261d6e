//! 강의 관련 요청 DTO
//!
//! 이름과 제목은 3~320자, 설명과 레슨 본문은 200자 이상이어야 합니다.

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::media::StoredObject;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 3, max = 320, message = "강의 이름은 3-320자 사이여야 합니다"))]
    pub name: String,

    #[validate(length(min = 200, message = "강의 설명은 200자 이상이어야 합니다"))]
    pub description: String,

    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: Option<f64>,

    pub category: Option<String>,

    pub paid: Option<bool>,

    #[validate(nested)]
    pub image: Option<StoredObject>,
}

/// 강의 부분 수정. slug는 바뀌지 않습니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 3, max = 320, message = "강의 이름은 3-320자 사이여야 합니다"))]
    pub name: Option<String>,

    #[validate(length(min = 200, message = "강의 설명은 200자 이상이어야 합니다"))]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: Option<f64>,

    pub category: Option<String>,

    pub paid: Option<bool>,

    #[validate(nested)]
    pub image: Option<StoredObject>,
}

impl UpdateCourseRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.paid.is_none()
            && self.image.is_none()
    }
}

/// `{"image": "data:image/png;base64,..."}`
#[derive(Debug, Deserialize)]
pub struct UploadImageRequest {
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RemoveImageRequest {
    #[validate(nested)]
    pub image: StoredObject,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RemoveVideoRequest {
    #[validate(nested)]
    pub video: StoredObject,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddLessonRequest {
    #[validate(length(min = 3, max = 320, message = "레슨 제목은 3-320자 사이여야 합니다"))]
    pub title: String,

    #[validate(length(min = 200, message = "레슨 내용은 200자 이상이어야 합니다"))]
    pub content: String,

    #[validate(nested)]
    pub video: Option<StoredObject>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLessonRequest {
    #[validate(length(min = 3, max = 320, message = "레슨 제목은 3-320자 사이여야 합니다"))]
    pub title: String,

    #[validate(length(min = 200, message = "레슨 내용은 200자 이상이어야 합니다"))]
    pub content: String,

    #[validate(nested)]
    pub video: Option<StoredObject>,

    #[serde(default)]
    pub free_preview: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_course_validation() {
        let request = CreateCourseRequest {
            name: "Rust".into(),
            description: "d".repeat(200),
            price: Some(19.99),
            category: None,
            paid: None,
            image: None,
        };
        assert!(request.validate().is_ok());

        let short = CreateCourseRequest {
            description: "too short".into(),
            ..request.clone()
        };
        assert!(short.validate().is_err());

        let negative = CreateCourseRequest {
            price: Some(-1.0),
            ..request
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_update_course_partial() {
        let request: UpdateCourseRequest = serde_json::from_str(r#"{"price": 5.0}"#).unwrap();

        assert!(!request.is_empty());
        assert!(request.validate().is_ok());
        assert!(UpdateCourseRequest::default().is_empty());
    }

    #[test]
    fn test_update_lesson_defaults_free_preview() {
        let json = format!(r#"{{"title": "Intro", "content": "{}"}}"#, "c".repeat(200));
        let request: UpdateLessonRequest = serde_json::from_str(&json).unwrap();

        assert!(!request.free_preview);
        assert!(request.validate().is_ok());
    }
}
