//! # 강의 관리 서비스
//!
//! 강의 생성, 수정, 공개 상태 변경과 레슨 추가/수정/삭제를 담당합니다.
//! 강의를 바꾸는 모든 작업은 호출자가 강의의 소유 강사인지 먼저 확인합니다.
//!
//! 응답으로 내보내는 강의는 `populate`를 거쳐 `instructor`가 `{_id, name}`
//! 요약으로 채워집니다. 강사 이름은 강의 수와 무관하게 쿼리 한 번으로 가져옵니다.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use mongodb::bson::{doc, oid::ObjectId, to_bson, Document};
use once_cell::sync::OnceCell;

use crate::core::registry::{Service, ServiceRegistration};
use crate::domain::dto::courses::{
    AddLessonRequest, CourseResponse, CreateCourseRequest, InstructorSummary, UpdateCourseRequest,
    UpdateLessonRequest,
};
use crate::domain::entities::courses::{Course, Lesson, NewCourse};
use crate::errors::{AppError, AppResult};
use crate::repositories::courses::CourseRepository;
use crate::repositories::users::UserRepository;
use crate::services::integrations::StorageService;
use crate::utils::string_utils::{clean_optional_string, slugify, validate_required_string};

static COURSE_SERVICE: OnceCell<Arc<CourseService>> = OnceCell::new();

pub struct CourseService {
    course_repo: Arc<CourseRepository>,
    user_repo: Arc<UserRepository>,
    storage: Arc<StorageService>,
}

/// 소유자가 아닌 사용자의 변경 시도
fn unauthorized_action() -> AppError {
    AppError::ValidationError("Unauthorized action.".to_string())
}

fn title_taken() -> AppError {
    AppError::ValidationError("Title already taken.".to_string())
}

fn course_not_found(slug: &str) -> AppError {
    AppError::NotFound(format!("강의를 찾을 수 없습니다: {}", slug))
}

/// 호출자가 강의의 소유 강사가 아니면 400 `Unauthorized action.`
pub fn ensure_owner(course: &Course, user_id: &ObjectId) -> AppResult<()> {
    if course.is_owned_by(user_id) {
        Ok(())
    } else {
        Err(unauthorized_action())
    }
}

/// 경로의 `instructorId`가 호출자와 다르면 400 `Unauthorized action.`
pub fn ensure_same_instructor(instructor_param: &ObjectId, user_id: &ObjectId) -> AppResult<()> {
    if instructor_param == user_id {
        Ok(())
    } else {
        Err(unauthorized_action())
    }
}

/// 강의에 없는 레슨이면 404
pub fn ensure_lesson(course: &Course, lesson_id: &ObjectId) -> AppResult<()> {
    match course.find_lesson(lesson_id) {
        Some(_) => Ok(()),
        None => Err(lesson_not_found(lesson_id)),
    }
}

fn lesson_not_found(lesson_id: &ObjectId) -> AppError {
    AppError::NotFound(format!("레슨을 찾을 수 없습니다: {}", lesson_id.to_hex()))
}

impl CourseService {
    pub fn instance() -> Arc<Self> {
        COURSE_SERVICE
            .get_or_init(|| {
                Arc::new(Self {
                    course_repo: CourseRepository::instance(),
                    user_repo: UserRepository::instance(),
                    storage: StorageService::instance(),
                })
            })
            .clone()
    }

    /// 강의 목록의 강사 정보를 채웁니다.
    pub async fn populate(&self, courses: Vec<Course>) -> AppResult<Vec<CourseResponse>> {
        let mut seen = HashSet::new();
        let instructor_ids: Vec<ObjectId> = courses
            .iter()
            .map(|course| course.instructor)
            .filter(|id| seen.insert(*id))
            .collect();

        let summaries = self.user_repo.find_summaries(&instructor_ids).await?;

        Ok(courses
            .into_iter()
            .map(|course| {
                let instructor = summaries
                    .get(&course.instructor)
                    .cloned()
                    .unwrap_or_else(|| InstructorSummary::unknown(&course.instructor));
                CourseResponse::new(course, instructor)
            })
            .collect())
    }

    pub async fn populate_one(&self, course: Course) -> AppResult<CourseResponse> {
        self.populate(vec![course])
            .await?
            .pop()
            .ok_or_else(|| AppError::InternalError("강의 응답 생성 실패".to_string()))
    }

    pub async fn list_published(&self) -> AppResult<Vec<CourseResponse>> {
        let courses = self.course_repo.find_published().await?;
        self.populate(courses).await
    }

    pub async fn get_by_slug(&self, slug: &str) -> AppResult<CourseResponse> {
        let course = self
            .course_repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| course_not_found(slug))?;

        self.populate_one(course).await
    }

    /// 강의를 만듭니다. slug는 이름에서 만들어지며 이미 있으면 400.
    pub async fn create(
        &self,
        instructor: &ObjectId,
        request: CreateCourseRequest,
    ) -> AppResult<CourseResponse> {
        let name = validate_required_string(&request.name, "강의 이름")?;
        let slug = slugify(&name);
        if slug.is_empty() {
            return Err(AppError::ValidationError(
                "강의 이름으로 slug를 만들 수 없습니다".to_string(),
            ));
        }

        if self.course_repo.exists_by_slug(&slug).await? {
            return Err(title_taken());
        }

        let course = Course::new(NewCourse {
            name,
            slug,
            description: request.description,
            price: request.price,
            category: clean_optional_string(request.category),
            paid: request.paid,
            image: request.image,
            instructor: *instructor,
        });

        let created = self.course_repo.create(course).await.map_err(|e| match e {
            AppError::ConflictError(_) => title_taken(),
            other => other,
        })?;

        info!("✅ 강의 생성: {} (강사 {})", created.slug, instructor.to_hex());
        self.populate_one(created).await
    }

    /// slug로 강의를 찾고 호출자가 소유자인지 확인합니다.
    pub async fn find_owned(&self, slug: &str, user_id: &ObjectId) -> AppResult<Course> {
        let course = self
            .course_repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| course_not_found(slug))?;

        if let Err(e) = ensure_owner(&course, user_id) {
            warn!("🚫 강의 소유자 불일치: {} / {}", slug, user_id.to_hex());
            return Err(e);
        }

        Ok(course)
    }

    /// id로 강의를 찾고 호출자가 소유자인지 확인합니다.
    pub async fn find_owned_by_id(&self, course_id: &ObjectId, user_id: &ObjectId) -> AppResult<Course> {
        let course = self
            .course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| course_not_found(&course_id.to_hex()))?;

        ensure_owner(&course, user_id)?;

        Ok(course)
    }

    pub async fn update(
        &self,
        slug: &str,
        user_id: &ObjectId,
        request: UpdateCourseRequest,
    ) -> AppResult<CourseResponse> {
        let course = self.find_owned(slug, user_id).await?;

        if request.is_empty() {
            return self.populate_one(course).await;
        }

        let mut fields = Document::new();
        if let Some(name) = request.name {
            fields.insert("name", validate_required_string(&name, "강의 이름")?);
        }
        if let Some(description) = request.description {
            fields.insert("description", description);
        }
        if let Some(price) = request.price {
            fields.insert("price", price);
        }
        if let Some(category) = request.category {
            fields.insert("category", to_bson(&clean_optional_string(Some(category)))?);
        }
        if let Some(paid) = request.paid {
            fields.insert("paid", paid);
        }
        if let Some(image) = request.image {
            fields.insert("image", to_bson(&image)?);
        }

        let updated = self
            .course_repo
            .update_fields(slug, fields)
            .await?
            .ok_or_else(|| course_not_found(slug))?;

        info!("📝 강의 수정: {}", slug);
        self.populate_one(updated).await
    }

    pub async fn set_published(
        &self,
        slug: &str,
        user_id: &ObjectId,
        published: bool,
    ) -> AppResult<CourseResponse> {
        self.find_owned(slug, user_id).await?;

        let updated = self
            .course_repo
            .set_published(slug, published)
            .await?
            .ok_or_else(|| course_not_found(slug))?;

        info!(
            "{} 강의 {}: {}",
            if published { "📢" } else { "🔕" },
            if published { "공개" } else { "비공개" },
            slug
        );
        self.populate_one(updated).await
    }

    /// 강의에 레슨을 추가합니다. 경로의 강사 id는 호출자와 같아야 합니다.
    pub async fn add_lesson(
        &self,
        slug: &str,
        instructor_param: &ObjectId,
        user_id: &ObjectId,
        request: AddLessonRequest,
    ) -> AppResult<CourseResponse> {
        ensure_same_instructor(instructor_param, user_id)?;
        self.find_owned(slug, user_id).await?;

        let title = validate_required_string(&request.title, "레슨 제목")?;
        let lesson_slug = slugify(&title);
        let lesson = Lesson::new(title, lesson_slug, request.content, request.video);

        let updated = self
            .course_repo
            .push_lesson(slug, &lesson)
            .await?
            .ok_or_else(|| course_not_found(slug))?;

        info!("➕ 레슨 추가: {} / {}", slug, lesson.slug);
        self.populate_one(updated).await
    }

    pub async fn update_lesson(
        &self,
        slug: &str,
        lesson_id: &ObjectId,
        user_id: &ObjectId,
        request: UpdateLessonRequest,
    ) -> AppResult<()> {
        self.find_owned(slug, user_id).await?;

        let title = validate_required_string(&request.title, "레슨 제목")?;
        let lesson_slug = slugify(&title);
        let fields = doc! {
            "title": title,
            "slug": lesson_slug,
            "content": request.content,
            "video": to_bson(&request.video)?,
            "free_preview": request.free_preview,
        };

        if !self.course_repo.update_lesson(slug, lesson_id, fields).await? {
            return Err(lesson_not_found(lesson_id));
        }

        info!("📝 레슨 수정: {} / {}", slug, lesson_id.to_hex());
        Ok(())
    }

    /// 레슨을 삭제하고 연결된 동영상 객체도 지웁니다.
    pub async fn remove_lesson(
        &self,
        slug: &str,
        lesson_id: &ObjectId,
        user_id: &ObjectId,
    ) -> AppResult<()> {
        let course = self.find_owned(slug, user_id).await?;
        ensure_lesson(&course, lesson_id)?;

        let before = self
            .course_repo
            .pull_lesson(slug, lesson_id)
            .await?
            .ok_or_else(|| course_not_found(slug))?;

        let video = before
            .find_lesson(lesson_id)
            .and_then(|lesson| lesson.video.clone());

        if let Some(video) = video {
            // 레슨은 이미 빠졌으므로 객체 삭제 실패는 요청을 실패시키지 않음
            if let Err(e) = self.storage.delete(&video).await {
                warn!("⚠️ 레슨 동영상 삭제 실패 ({}): {}", video.key, e);
            }
        }

        info!("🗑️ 레슨 삭제: {} / {}", slug, lesson_id.to_hex());
        Ok(())
    }

    /// 수강 중인 사용자에게만 강의 전체(레슨 포함)를 보여줍니다.
    pub async fn get_for_student(&self, slug: &str, user_id: &ObjectId) -> AppResult<CourseResponse> {
        let course = self
            .course_repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| course_not_found(slug))?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("사용자가 존재하지 않습니다".to_string()))?;

        let enrolled = course
            .id
            .as_ref()
            .is_some_and(|course_id| user.is_enrolled_in(course_id));
        if !enrolled {
            return Err(AppError::AuthorizationError("수강 중인 강의가 아닙니다".to_string()));
        }

        self.populate_one(course).await
    }

    /// 강사 본인의 강의 목록 (최신순)
    pub async fn instructor_courses(&self, instructor: &ObjectId) -> AppResult<Vec<CourseResponse>> {
        let courses = self.course_repo.find_by_instructor(instructor).await?;
        self.populate(courses).await
    }
}

#[async_trait]
impl Service for CourseService {
    fn name(&self) -> &str {
        "course"
    }
}

fn construct_course_service() -> Arc<dyn Service> {
    CourseService::instance()
}

inventory::submit! {
    ServiceRegistration {
        name: "course_service",
        constructor: construct_course_service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    fn course_with_lesson(instructor: ObjectId) -> (Course, ObjectId) {
        let mut course = Course::new(NewCourse {
            name: "Rust Web".into(),
            slug: "rust-web".into(),
            description: "x".repeat(200),
            price: None,
            category: None,
            paid: None,
            image: None,
            instructor,
        });
        let lesson = Lesson::new("Intro".into(), "intro".into(), "x".repeat(200), None);
        let lesson_id = lesson.id;
        course.lessons.push(lesson);
        (course, lesson_id)
    }

    #[test]
    fn test_non_owner_is_unauthorized_action() {
        let owner = ObjectId::new();
        let (course, _) = course_with_lesson(owner);

        assert!(ensure_owner(&course, &owner).is_ok());

        let err = ensure_owner(&course, &ObjectId::new()).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Unauthorized action.");
    }

    #[test]
    fn test_instructor_param_must_match_caller() {
        let caller = ObjectId::new();

        assert!(ensure_same_instructor(&caller, &caller).is_ok());

        let err = ensure_same_instructor(&ObjectId::new(), &caller).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Unauthorized action.");
    }

    #[test]
    fn test_title_taken_message() {
        let err = title_taken();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Title already taken.");
    }

    #[test]
    fn test_unknown_lesson_is_not_found() {
        let (course, lesson_id) = course_with_lesson(ObjectId::new());

        assert!(ensure_lesson(&course, &lesson_id).is_ok());
        assert_eq!(
            ensure_lesson(&course, &ObjectId::new()).unwrap_err().status(),
            StatusCode::NOT_FOUND
        );
    }
}
