//! 강사 대시보드 응답 DTO

use serde::Serialize;

/// 수강생 목록 항목 `{_id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRef {
    #[serde(rename = "_id")]
    pub id: String,
}
