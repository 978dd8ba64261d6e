//! 레슨 완료 기록 서비스

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use mongodb::bson::oid::ObjectId;
use once_cell::sync::OnceCell;

use crate::core::registry::{Service, ServiceRegistration};
use crate::domain::entities::completed::CompletedLessons;
use crate::errors::AppResult;
use crate::repositories::completed::CompletedRepository;
use crate::utils::string_utils::parse_object_id;

/// 완료 기록의 레슨 id 목록. 기록이 없으면 빈 목록.
pub fn completed_lessons(record: Option<CompletedLessons>) -> Vec<String> {
    record.map(|record| record.lessons).unwrap_or_default()
}

static COMPLETION_SERVICE: OnceCell<Arc<CompletionService>> = OnceCell::new();

pub struct CompletionService {
    completed_repo: Arc<CompletedRepository>,
}

impl CompletionService {
    pub fn instance() -> Arc<Self> {
        COMPLETION_SERVICE
            .get_or_init(|| {
                Arc::new(Self {
                    completed_repo: CompletedRepository::instance(),
                })
            })
            .clone()
    }

    /// 레슨 id는 ObjectId 형식만 허용하고 hex 문자열로 저장합니다.
    fn lesson_key(lesson_id: &str) -> AppResult<String> {
        Ok(parse_object_id(lesson_id, "레슨 id")?.to_hex())
    }

    pub async fn mark_completed(&self, user: &ObjectId, course: &ObjectId, lesson_id: &str) -> AppResult<()> {
        let lesson = Self::lesson_key(lesson_id)?;
        self.completed_repo.add_lesson(user, course, &lesson).await?;

        debug!("✅ 레슨 완료: {} / {} / {}", user.to_hex(), course.to_hex(), lesson);
        Ok(())
    }

    pub async fn mark_incomplete(&self, user: &ObjectId, course: &ObjectId, lesson_id: &str) -> AppResult<()> {
        let lesson = Self::lesson_key(lesson_id)?;
        self.completed_repo.remove_lesson(user, course, &lesson).await?;

        debug!("↩️ 레슨 완료 취소: {} / {} / {}", user.to_hex(), course.to_hex(), lesson);
        Ok(())
    }

    pub async fn list_completed(&self, user: &ObjectId, course: &ObjectId) -> AppResult<Vec<String>> {
        let record = self.completed_repo.find(user, course).await?;
        Ok(completed_lessons(record))
    }
}

#[async_trait]
impl Service for CompletionService {
    fn name(&self) -> &str {
        "completion"
    }
}

fn construct_completion_service() -> Arc<dyn Service> {
    CompletionService::instance()
}

inventory::submit! {
    ServiceRegistration {
        name: "completion_service",
        constructor: construct_completion_service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_key_normalizes_hex() {
        let id = ObjectId::new();
        assert_eq!(
            CompletionService::lesson_key(&id.to_hex().to_uppercase()).unwrap(),
            id.to_hex()
        );
    }

    #[test]
    fn test_lesson_key_rejects_garbage() {
        assert!(CompletionService::lesson_key("lesson-1").is_err());
    }

    #[test]
    fn test_completed_lessons_without_record_is_empty() {
        assert!(completed_lessons(None).is_empty());
        assert_eq!(serde_json::to_string(&completed_lessons(None)).unwrap(), "[]");
    }

    #[test]
    fn test_completed_lessons_from_record() {
        let lesson = ObjectId::new().to_hex();
        let record = CompletedLessons {
            id: None,
            user: ObjectId::new(),
            course: ObjectId::new(),
            lessons: vec![lesson.clone()],
            created_at: None,
            updated_at: None,
        };

        assert_eq!(completed_lessons(Some(record)), vec![lesson]);
    }
}
