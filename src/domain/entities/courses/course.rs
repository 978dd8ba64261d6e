//! Course / Lesson 엔티티
//!
//! 강의 문서는 레슨을 배열로 내장합니다. 레슨마다 자체 `_id`를 가지며
//! 수정, 삭제, 완료 표시는 이 id로 대상을 찾습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::entities::media::StoredObject;

pub const DEFAULT_COURSE_PRICE: f64 = 9.99;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<StoredObject>,
    #[serde(default)]
    pub free_preview: bool,
}

impl Lesson {
    pub fn new(title: String, slug: String, content: String, video: Option<StoredObject>) -> Self {
        Self {
            id: ObjectId::new(),
            title,
            slug,
            content,
            video,
            free_preview: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(default = "default_price")]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<StoredObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default = "default_paid")]
    pub paid: bool,
    pub instructor: ObjectId,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime,
}

fn default_price() -> f64 {
    DEFAULT_COURSE_PRICE
}

fn default_paid() -> bool {
    true
}

/// 새 강의 생성에 필요한 값
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub paid: Option<bool>,
    pub image: Option<StoredObject>,
    pub instructor: ObjectId,
}

impl Course {
    pub fn new(input: NewCourse) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name: input.name,
            slug: input.slug,
            description: input.description,
            price: input.price.unwrap_or(DEFAULT_COURSE_PRICE),
            image: input.image,
            category: input.category,
            published: false,
            paid: input.paid.unwrap_or(true),
            instructor: input.instructor,
            lessons: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_owned_by(&self, user_id: &ObjectId) -> bool {
        &self.instructor == user_id
    }

    pub fn find_lesson(&self, lesson_id: &ObjectId) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| &lesson.id == lesson_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(instructor: ObjectId) -> Course {
        Course::new(NewCourse {
            name: "Rust Web".into(),
            slug: "rust-web".into(),
            description: "x".repeat(200),
            price: None,
            category: None,
            paid: None,
            image: None,
            instructor,
        })
    }

    #[test]
    fn test_new_course_defaults() {
        let course = sample(ObjectId::new());

        assert_eq!(course.price, DEFAULT_COURSE_PRICE);
        assert!(course.paid);
        assert!(!course.published);
        assert!(course.lessons.is_empty());
    }

    #[test]
    fn test_ownership() {
        let owner = ObjectId::new();
        let course = sample(owner);

        assert!(course.is_owned_by(&owner));
        assert!(!course.is_owned_by(&ObjectId::new()));
    }

    #[test]
    fn test_find_lesson() {
        let mut course = sample(ObjectId::new());
        let lesson = Lesson::new("Intro".into(), "intro".into(), "c".repeat(200), None);
        let lesson_id = lesson.id;
        course.lessons.push(lesson);

        assert_eq!(course.find_lesson(&lesson_id).map(|l| l.slug.as_str()), Some("intro"));
        assert!(course.find_lesson(&ObjectId::new()).is_none());
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let doc = mongodb::bson::doc! {
            "name": "Rust Web",
            "slug": "rust-web",
            "description": "d",
            "instructor": ObjectId::new(),
            "createdAt": DateTime::now(),
            "updatedAt": DateTime::now(),
        };

        let course: Course = mongodb::bson::from_document(doc).unwrap();
        assert_eq!(course.price, DEFAULT_COURSE_PRICE);
        assert!(course.paid);
        assert!(!course.published);
    }
}
