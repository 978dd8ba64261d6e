//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 각 리포지토리는 `static OnceCell`에 보관되는 싱글톤이며, 시작 시
//! `ServiceLocator::initialize_all()`이 `Repository::init`을 호출하여
//! 컬렉션 인덱스를 만듭니다. MongoDB가 원본이고 Redis는 읽기 캐시입니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::courses::CourseRepository;
//!
//! let course = CourseRepository::instance().find_by_slug("rust-web").await?;
//! ```

pub mod users;
pub mod courses;
pub mod completed;

/// MongoDB 중복 키(11000) 에러인지 확인합니다.
pub(crate) fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}
