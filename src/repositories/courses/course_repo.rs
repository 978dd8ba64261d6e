//! # 강의 리포지토리 구현
//!
//! `courses` 컬렉션과 레슨 배열을 다룹니다. slug 단건 조회와 공개 강의 목록을
//! Redis에 캐시하며, 강의가 바뀌면 해당 slug 키와 목록 키를 함께 지웁니다.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::warn;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};
use once_cell::sync::OnceCell;

use crate::caching::redis::RedisClient;
use crate::caching::CacheKeys;
use crate::config::CacheConfig;
use crate::core::registry::{Repository, RepositoryRegistration, ServiceLocator};
use crate::db::Database;
use crate::domain::entities::courses::{Course, Lesson};
use crate::errors::{AppError, AppResult};
use crate::repositories::is_duplicate_key;

static COURSE_REPOSITORY: OnceCell<Arc<CourseRepository>> = OnceCell::new();

pub struct CourseRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl CourseRepository {
    pub const COLLECTION: &'static str = "courses";

    pub fn instance() -> Arc<Self> {
        COURSE_REPOSITORY
            .get_or_init(|| {
                Arc::new(Self {
                    db: ServiceLocator::get::<Database>(),
                    redis: ServiceLocator::get::<RedisClient>(),
                })
            })
            .clone()
    }

    fn collection(&self) -> Collection<Course> {
        self.db.get_database().collection::<Course>(Self::COLLECTION)
    }

    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Course>> {
        let cache_key = CacheKeys::course(slug);

        if let Ok(Some(cached)) = self.redis.get::<Course>(&cache_key).await {
            return Ok(Some(cached));
        }

        let course = self.collection().find_one(doc! { "slug": slug }).await?;

        if let Some(ref course) = course {
            if let Err(e) = self
                .redis
                .set_with_expiry(&cache_key, course, CacheConfig::ttl_seconds())
                .await
            {
                warn!("⚠️ 강의 캐시 저장 실패 ({}): {}", cache_key, e);
            }
        }

        Ok(course)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Course>> {
        Ok(self.collection().find_one(doc! { "_id": *id }).await?)
    }

    pub async fn exists_by_slug(&self, slug: &str) -> AppResult<bool> {
        let count = self
            .collection()
            .count_documents(doc! { "slug": slug })
            .limit(1)
            .await?;

        Ok(count > 0)
    }

    /// # Errors
    ///
    /// * `AppError::ConflictError` - 같은 slug가 이미 있는 경우
    pub async fn create(&self, mut course: Course) -> AppResult<Course> {
        let result = self.collection().insert_one(&course).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::ConflictError(format!("이미 사용 중인 slug입니다: {}", course.slug))
            } else {
                AppError::DatabaseError(e.to_string())
            }
        })?;

        course.id = result.inserted_id.as_object_id();
        self.invalidate_cache(&course.slug).await;

        Ok(course)
    }

    /// 공개된 강의 목록 (최신순)
    pub async fn find_published(&self) -> AppResult<Vec<Course>> {
        let cache_key = CacheKeys::published_courses();

        if let Ok(Some(cached)) = self.redis.get::<Vec<Course>>(&cache_key).await {
            return Ok(cached);
        }

        let courses: Vec<Course> = self
            .collection()
            .find(doc! { "published": true })
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;

        if let Err(e) = self
            .redis
            .set_with_expiry(&cache_key, &courses, CacheConfig::ttl_seconds())
            .await
        {
            warn!("⚠️ 강의 목록 캐시 저장 실패: {}", e);
        }

        Ok(courses)
    }

    pub async fn find_by_instructor(&self, instructor: &ObjectId) -> AppResult<Vec<Course>> {
        let courses = self
            .collection()
            .find(doc! { "instructor": *instructor })
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(courses)
    }

    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Course>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let courses = self
            .collection()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(courses)
    }

    async fn update_by_slug(
        &self,
        slug: &str,
        mut update: Document,
        return_document: ReturnDocument,
    ) -> AppResult<Option<Course>> {
        let now = DateTime::now();
        match update.get_document_mut("$set") {
            Ok(set) => {
                set.insert("updatedAt", now);
            }
            Err(_) => {
                update.insert("$set", doc! { "updatedAt": now });
            }
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(return_document)
            .build();

        let course = self
            .collection()
            .find_one_and_update(doc! { "slug": slug }, update)
            .with_options(options)
            .await?;

        if course.is_some() {
            self.invalidate_cache(slug).await;
        }

        Ok(course)
    }

    /// `$set` 필드를 적용하고 갱신된 강의를 반환합니다.
    pub async fn update_fields(&self, slug: &str, fields: Document) -> AppResult<Option<Course>> {
        self.update_by_slug(slug, doc! { "$set": fields }, ReturnDocument::After)
            .await
    }

    pub async fn set_published(&self, slug: &str, published: bool) -> AppResult<Option<Course>> {
        self.update_by_slug(
            slug,
            doc! { "$set": { "published": published } },
            ReturnDocument::After,
        )
        .await
    }

    pub async fn push_lesson(&self, slug: &str, lesson: &Lesson) -> AppResult<Option<Course>> {
        let lesson = mongodb::bson::to_bson(lesson)?;

        self.update_by_slug(
            slug,
            doc! { "$push": { "lessons": lesson } },
            ReturnDocument::After,
        )
        .await
    }

    /// 레슨을 제거하고 **제거 전** 문서를 반환합니다. 호출자는 이전 문서에서
    /// 지워진 레슨의 동영상 정보를 꺼낼 수 있습니다.
    pub async fn pull_lesson(&self, slug: &str, lesson_id: &ObjectId) -> AppResult<Option<Course>> {
        self.update_by_slug(
            slug,
            doc! { "$pull": { "lessons": { "_id": *lesson_id } } },
            ReturnDocument::Before,
        )
        .await
    }

    /// 특정 레슨의 필드를 갱신합니다. 해당 레슨이 없으면 `false`.
    pub async fn update_lesson(
        &self,
        slug: &str,
        lesson_id: &ObjectId,
        fields: Document,
    ) -> AppResult<bool> {
        let mut set = Document::new();
        for (key, value) in fields {
            set.insert(format!("lessons.$.{}", key), value);
        }
        set.insert("updatedAt", DateTime::now());

        let result = self
            .collection()
            .update_one(
                doc! { "slug": slug, "lessons._id": *lesson_id },
                doc! { "$set": set },
            )
            .await?;

        if result.matched_count > 0 {
            self.invalidate_cache(slug).await;
        }

        Ok(result.matched_count > 0)
    }

    async fn invalidate_cache(&self, slug: &str) {
        let keys = [CacheKeys::course(slug), CacheKeys::published_courses()];
        if let Err(e) = self.redis.del_multiple(&keys).await {
            warn!("⚠️ 강의 캐시 무효화 실패 ({}): {}", slug, e);
        }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let slug_index = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("slug_unique".to_string())
                    .build(),
            )
            .build();

        let instructor_index = IndexModel::builder()
            .keys(doc! { "instructor": 1, "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("instructor_created_at".to_string())
                    .build(),
            )
            .build();

        let published_index = IndexModel::builder()
            .keys(doc! { "published": 1, "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("published_created_at".to_string())
                    .build(),
            )
            .build();

        self.collection()
            .create_indexes([slug_index, instructor_index, published_index])
            .await?;

        Ok(())
    }
}

#[async_trait]
impl Repository for CourseRepository {
    fn name(&self) -> &str {
        "course"
    }

    fn collection_name(&self) -> &str {
        Self::COLLECTION
    }

    async fn init(&self) -> AppResult<()> {
        self.create_indexes().await
    }
}

fn construct_course_repository() -> Arc<dyn Repository> {
    CourseRepository::instance()
}

inventory::submit! {
    RepositoryRegistration {
        name: "course_repository",
        constructor: construct_course_repository,
    }
}
