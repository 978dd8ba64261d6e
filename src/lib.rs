//! Edemy 강의 마켓플레이스 백엔드
//!
//! 강사가 강의를 만들어 판매하고 수강생이 무료/유료로 수강 신청하는
//! 온라인 강의 플랫폼의 REST API 서버입니다.
//!
//! # Features
//!
//! - **계정**: 회원가입, 쿠키 기반 JWT 로그인, 이메일 코드로 비밀번호 재설정
//! - **강의 작성**: 강의/레슨 CRUD, 이미지/동영상 오브젝트 스토리지 업로드
//! - **수강**: 무료 수강, Stripe Checkout 결제 후 수강, 레슨 완료 기록
//! - **강사 정산**: Stripe Connect Express 온보딩, 잔액 조회, 정산 대시보드 링크
//! - **MongoDB**: 영구 저장
//! - **Redis**: 사용자/강의 조회 캐시
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 (/api)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증, 쿠키 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직, 외부 연동 (S3 / SES / Stripe)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use edemy_backend::services::courses::CourseService;
//!
//! // 싱글톤 서비스 인스턴스 가져오기
//! let course_service = CourseService::instance();
//! let courses = course_service.list_published().await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
