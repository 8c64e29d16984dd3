use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::LessonType;

#[derive(Debug, Serialize, ToSchema)]
pub struct CompleteLessonResponse {
    pub success: bool,
    pub message: String,
    /// Set when completing this lesson finished the course and issued a
    /// certificate
    pub certificate_code: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonProgressItem {
    pub lesson_id: Uuid,
    pub title: String,
    pub lesson_type: LessonType,
    pub completed: bool,
    pub completed_at: Option<chrono::NaiveDateTime>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseProgressResponse {
    pub course_id: Uuid,
    pub total_lessons: usize,
    pub completed_lessons: usize,
    /// Task lessons gate certificate issuance
    pub gating_lessons_total: usize,
    pub gating_lessons_completed: usize,
    pub lessons: Vec<LessonProgressItem>,
}
