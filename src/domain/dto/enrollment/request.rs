use serde::Deserialize;
use validator::Validate;

/// 레슨 완료/미완료 표시 요청
#[derive(Debug, Deserialize, Validate)]
pub struct MarkCompletedRequest {
    #[serde(rename = "courseId")]
    #[validate(length(equal = 24, message = "잘못된 강의 id입니다"))]
    pub course_id: String,

    #[serde(rename = "lessonId")]
    #[validate(length(min = 1, message = "레슨 id가 필요합니다"))]
    pub lesson_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CourseIdRequest {
    #[serde(rename = "courseId")]
    #[validate(length(equal = 24, message = "잘못된 강의 id입니다"))]
    pub course_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_fields() {
        let request: MarkCompletedRequest = serde_json::from_str(
            r#"{"courseId": "64b7f0c2a1b2c3d4e5f60718", "lessonId": "64b7f0c2a1b2c3d4e5f60719"}"#,
        )
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.lesson_id, "64b7f0c2a1b2c3d4e5f60719");
    }

    #[test]
    fn test_bad_course_id_length() {
        let request: CourseIdRequest = serde_json::from_str(r#"{"courseId": "123"}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
