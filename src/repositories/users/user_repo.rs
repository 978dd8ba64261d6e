//! # 사용자 리포지토리 구현
//!
//! `users` 컬렉션의 데이터 액세스 계층입니다.
//!
//! - **캐싱**: id 기반 조회만 Redis에 캐시하고, 모든 쓰기 후 해당 키를 지웁니다.
//!   id 조회 결과는 비밀번호 해시와 재설정 코드가 비워진 상태입니다.
//!   이메일 조회는 로그인/비밀번호 재설정에 쓰이므로 항상 DB를 직접 읽습니다.
//! - **집합 연산**: 역할과 수강 강의는 `$addToSet`으로 중복 없이 추가합니다.
//! - **인덱스**: 이메일 유니크 인덱스, 수강 강의 인덱스(수강생 수 집계용).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::warn;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};
use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::caching::redis::RedisClient;
use crate::caching::CacheKeys;
use crate::config::CacheConfig;
use crate::core::registry::{Repository, RepositoryRegistration, ServiceLocator};
use crate::db::Database;
use crate::domain::dto::courses::InstructorSummary;
use crate::domain::entities::users::user::{Role, User};
use crate::domain::models::payments::ConnectedAccount;
use crate::errors::{AppError, AppResult};
use crate::repositories::is_duplicate_key;

static USER_REPOSITORY: OnceCell<Arc<UserRepository>> = OnceCell::new();

/// `_id`만 읽어오는 projection 결과
#[derive(Debug, Deserialize)]
struct IdOnly {
    #[serde(rename = "_id")]
    id: ObjectId,
}

/// `_id`, `name`만 읽어오는 projection 결과
#[derive(Debug, Deserialize)]
struct NameOnly {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default)]
    name: String,
}

pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl UserRepository {
    pub const COLLECTION: &'static str = "users";

    pub fn instance() -> Arc<Self> {
        USER_REPOSITORY
            .get_or_init(|| {
                Arc::new(Self {
                    db: ServiceLocator::get::<Database>(),
                    redis: ServiceLocator::get::<RedisClient>(),
                })
            })
            .clone()
    }

    fn collection<T: Send + Sync>(&self) -> Collection<T> {
        self.db.get_database().collection::<T>(Self::COLLECTION)
    }

    fn return_after() -> FindOneAndUpdateOptions {
        FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build()
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self
            .collection::<User>()
            .find_one(doc! { "email": email.trim().to_lowercase() })
            .await?;

        Ok(user)
    }

    /// id로 사용자를 찾습니다. 결과에는 비밀번호와 재설정 코드가 없습니다.
    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        let cache_key = CacheKeys::user(&id.to_hex());

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self
            .collection::<User>()
            .find_one(doc! { "_id": *id })
            .await?
            .map(User::without_secrets);

        if let Some(ref user) = user {
            if let Err(e) = self
                .redis
                .set_with_expiry(&cache_key, user, CacheConfig::ttl_seconds())
                .await
            {
                warn!("⚠️ 사용자 캐시 저장 실패 ({}): {}", cache_key, e);
            }
        }

        Ok(user)
    }

    /// 새 사용자를 저장합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 같은 이메일이 이미 있는 경우 (유니크 인덱스)
    pub async fn create(&self, mut user: User) -> AppResult<User> {
        let result = self
            .collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError("Email is taken.".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        user.id = result.inserted_id.as_object_id();

        Ok(user)
    }

    /// 임의의 업데이트 문서를 적용하고 갱신된 문서를 반환합니다.
    /// `updatedAt`은 항상 함께 갱신됩니다.
    async fn update_one_by(&self, filter: Document, mut update: Document) -> AppResult<Option<User>> {
        let now = DateTime::now();
        match update.get_document_mut("$set") {
            Ok(set) => {
                set.insert("updatedAt", now);
            }
            Err(_) => {
                update.insert("$set", doc! { "updatedAt": now });
            }
        }

        let updated = self
            .collection::<User>()
            .find_one_and_update(filter, update)
            .with_options(Self::return_after())
            .await?;

        if let Some(id) = updated.as_ref().and_then(|user| user.id) {
            self.invalidate_cache(&id).await;
        }

        Ok(updated)
    }

    pub async fn set_reset_code(&self, email: &str, code: &str) -> AppResult<Option<User>> {
        self.update_one_by(
            doc! { "email": email.trim().to_lowercase() },
            doc! { "$set": { "passwordResetCode": code } },
        )
        .await
    }

    /// 이메일과 재설정 코드가 모두 일치하면 비밀번호를 바꾸고 코드를 비웁니다.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        password_hash: &str,
    ) -> AppResult<Option<User>> {
        if code.is_empty() {
            return Ok(None);
        }

        self.update_one_by(
            doc! { "email": email.trim().to_lowercase(), "passwordResetCode": code },
            doc! { "$set": { "password": password_hash, "passwordResetCode": "" } },
        )
        .await
    }

    pub async fn set_stripe_account_id(&self, id: &ObjectId, account_id: &str) -> AppResult<Option<User>> {
        self.update_one_by(
            doc! { "_id": *id },
            doc! { "$set": { "stripe_account_id": account_id } },
        )
        .await
    }

    /// 연결 계정 스냅샷을 저장하고 강사 역할을 부여합니다.
    pub async fn promote_to_instructor(
        &self,
        id: &ObjectId,
        account: &ConnectedAccount,
    ) -> AppResult<Option<User>> {
        let snapshot = mongodb::bson::to_bson(account)?;

        self.update_one_by(
            doc! { "_id": *id },
            doc! {
                "$set": { "stripe_seller": snapshot },
                "$addToSet": { "role": Role::Instructor.as_str() },
            },
        )
        .await
    }

    /// 결제 대기 세션을 대상 강의와 함께 기록합니다.
    pub async fn set_stripe_session(
        &self,
        id: &ObjectId,
        session_id: &str,
        course_id: &ObjectId,
    ) -> AppResult<Option<User>> {
        self.update_one_by(
            doc! { "_id": *id },
            doc! { "$set": { "stripeSession": { "id": session_id, "course": *course_id } } },
        )
        .await
    }

    /// 강의를 수강 목록에 추가합니다. `clear_session`이면 대기 중 세션도 지웁니다.
    pub async fn add_course(
        &self,
        id: &ObjectId,
        course_id: &ObjectId,
        clear_session: bool,
    ) -> AppResult<Option<User>> {
        let mut update = doc! { "$addToSet": { "courses": *course_id } };
        if clear_session {
            update.insert("$unset", doc! { "stripeSession": "" });
        }

        self.update_one_by(doc! { "_id": *id }, update).await
    }

    /// 해당 강의를 수강 중인 사용자 id 목록
    pub async fn find_ids_enrolled_in(&self, course_id: &ObjectId) -> AppResult<Vec<ObjectId>> {
        let cursor = self
            .collection::<IdOnly>()
            .find(doc! { "courses": *course_id })
            .projection(doc! { "_id": 1 })
            .await?;

        let rows: Vec<IdOnly> = cursor.try_collect().await?;
        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    /// 강의 응답용 강사 요약을 한 번의 쿼리로 가져옵니다.
    pub async fn find_summaries(
        &self,
        ids: &[ObjectId],
    ) -> AppResult<HashMap<ObjectId, InstructorSummary>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let cursor = self
            .collection::<NameOnly>()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .projection(doc! { "_id": 1, "name": 1 })
            .await?;

        let rows: Vec<NameOnly> = cursor.try_collect().await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let summary = InstructorSummary {
                    id: row.id.to_hex(),
                    name: row.name,
                };
                (row.id, summary)
            })
            .collect())
    }

    async fn invalidate_cache(&self, id: &ObjectId) {
        let cache_key = CacheKeys::user(&id.to_hex());
        if let Err(e) = self.redis.del(&cache_key).await {
            warn!("⚠️ 사용자 캐시 무효화 실패 ({}): {}", cache_key, e);
        }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        let courses_index = IndexModel::builder()
            .keys(doc! { "courses": 1 })
            .options(IndexOptions::builder().name("courses".to_string()).build())
            .build();

        self.collection::<User>()
            .create_indexes([email_index, courses_index])
            .await?;

        Ok(())
    }
}

#[async_trait]
impl Repository for UserRepository {
    fn name(&self) -> &str {
        "user"
    }

    fn collection_name(&self) -> &str {
        Self::COLLECTION
    }

    async fn init(&self) -> AppResult<()> {
        self.create_indexes().await
    }
}

fn construct_user_repository() -> Arc<dyn Repository> {
    UserRepository::instance()
}

inventory::submit! {
    RepositoryRegistration {
        name: "user_repository",
        constructor: construct_user_repository,
    }
}
