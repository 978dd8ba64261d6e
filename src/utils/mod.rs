//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 문자열 정리, slug 생성, data URL 디코딩, id 파싱
//! - [`date_utils`] - BSON 날짜 포맷팅

pub mod string_utils;
pub mod date_utils;
