use serde::Serialize;

use crate::domain::dto::courses::CourseResponse;

#[derive(Debug, Serialize)]
pub struct EnrollmentStatusResponse {
    pub status: bool,
    pub course: CourseResponse,
}

#[derive(Debug, Serialize)]
pub struct EnrollmentResponse {
    pub message: String,
    pub course: CourseResponse,
}
