//! 강의 응답 DTO
//!
//! `instructor`는 `{_id, name}`으로 채워서 내보냅니다.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::entities::courses::{Course, Lesson};
use crate::domain::entities::media::StoredObject;
use crate::utils::date_utils::to_rfc3339;

/// 강의 응답에 포함되는 강사 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructorSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

impl InstructorSummary {
    /// 강사 문서를 찾지 못했을 때 id만 채운 요약
    pub fn unknown(id: &ObjectId) -> Self {
        Self {
            id: id.to_hex(),
            name: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<StoredObject>,
    pub free_preview: bool,
}

impl From<Lesson> for LessonResponse {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id.to_hex(),
            title: lesson.title,
            slug: lesson.slug,
            content: lesson.content,
            video: lesson.video,
            free_preview: lesson.free_preview,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<StoredObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub published: bool,
    pub paid: bool,
    pub instructor: InstructorSummary,
    pub lessons: Vec<LessonResponse>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl CourseResponse {
    pub fn new(course: Course, instructor: InstructorSummary) -> Self {
        Self {
            id: course.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: course.name,
            slug: course.slug,
            description: course.description,
            price: course.price,
            image: course.image,
            category: course.category,
            published: course.published,
            paid: course.paid,
            instructor,
            lessons: course.lessons.into_iter().map(LessonResponse::from).collect(),
            created_at: to_rfc3339(&course.created_at),
            updated_at: to_rfc3339(&course.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::courses::NewCourse;

    #[test]
    fn test_course_response_shape() {
        let instructor = ObjectId::new();
        let mut course = Course::new(NewCourse {
            name: "Rust Web".into(),
            slug: "rust-web".into(),
            description: "d".repeat(200),
            price: Some(19.99),
            category: Some("programming".into()),
            paid: None,
            image: None,
            instructor,
        });
        course.id = Some(ObjectId::new());
        course
            .lessons
            .push(Lesson::new("Intro".into(), "intro".into(), "c".repeat(200), None));

        let summary = InstructorSummary {
            id: instructor.to_hex(),
            name: "Ryan".into(),
        };
        let json = serde_json::to_value(CourseResponse::new(course, summary)).unwrap();

        assert_eq!(json["instructor"]["name"], "Ryan");
        assert_eq!(json["instructor"]["_id"], instructor.to_hex());
        assert_eq!(json["lessons"][0]["slug"], "intro");
        assert_eq!(json["lessons"][0]["free_preview"], false);
        assert!(json.get("image").is_none());
    }
}
