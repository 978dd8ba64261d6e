//! 레슨 완료 기록 리포지토리 (`completeds` 컬렉션)

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use once_cell::sync::OnceCell;

use crate::core::registry::{Repository, RepositoryRegistration, ServiceLocator};
use crate::db::Database;
use crate::domain::entities::completed::CompletedLessons;
use crate::errors::AppResult;

static COMPLETED_REPOSITORY: OnceCell<Arc<CompletedRepository>> = OnceCell::new();

pub struct CompletedRepository {
    db: Arc<Database>,
}

impl CompletedRepository {
    pub const COLLECTION: &'static str = "completeds";

    pub fn instance() -> Arc<Self> {
        COMPLETED_REPOSITORY
            .get_or_init(|| {
                Arc::new(Self {
                    db: ServiceLocator::get::<Database>(),
                })
            })
            .clone()
    }

    fn collection(&self) -> Collection<CompletedLessons> {
        self.db
            .get_database()
            .collection::<CompletedLessons>(Self::COLLECTION)
    }

    pub async fn find(&self, user: &ObjectId, course: &ObjectId) -> AppResult<Option<CompletedLessons>> {
        Ok(self
            .collection()
            .find_one(doc! { "user": *user, "course": *course })
            .await?)
    }

    /// (user, course) 문서가 없으면 만들고 레슨 id를 집합에 추가합니다.
    pub async fn add_lesson(&self, user: &ObjectId, course: &ObjectId, lesson_id: &str) -> AppResult<()> {
        let now = DateTime::now();

        self.collection()
            .update_one(
                doc! { "user": *user, "course": *course },
                doc! {
                    "$addToSet": { "lessons": lesson_id },
                    "$set": { "updatedAt": now },
                    "$setOnInsert": { "createdAt": now },
                },
            )
            .upsert(true)
            .await?;

        Ok(())
    }

    pub async fn remove_lesson(&self, user: &ObjectId, course: &ObjectId, lesson_id: &str) -> AppResult<()> {
        self.collection()
            .update_one(
                doc! { "user": *user, "course": *course },
                doc! {
                    "$pull": { "lessons": lesson_id },
                    "$set": { "updatedAt": DateTime::now() },
                },
            )
            .await?;

        Ok(())
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let pair_index = IndexModel::builder()
            .keys(doc! { "user": 1, "course": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_course_unique".to_string())
                    .build(),
            )
            .build();

        self.collection().create_index(pair_index).await?;

        Ok(())
    }
}

#[async_trait]
impl Repository for CompletedRepository {
    fn name(&self) -> &str {
        "completed"
    }

    fn collection_name(&self) -> &str {
        Self::COLLECTION
    }

    async fn init(&self) -> AppResult<()> {
        self.create_indexes().await
    }
}

fn construct_completed_repository() -> Arc<dyn Repository> {
    CompletedRepository::instance()
}

inventory::submit! {
    RepositoryRegistration {
        name: "completed_repository",
        constructor: construct_completed_repository,
    }
}
