use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::LessonType;
use crate::entities::{course, course_module, lesson};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCourseRequest {
    pub internship_id: Uuid,

    #[schema(example = "Backend Fundamentals")]
    pub title: String,

    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateModuleRequest {
    #[schema(example = "HTTP Basics")]
    pub title: String,

    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateLessonRequest {
    #[schema(example = "Build a REST endpoint")]
    pub title: String,

    #[schema(example = "Task")]
    pub lesson_type: LessonType,

    pub content: Option<String>,

    pub video_url: Option<String>,

    #[serde(default)]
    pub duration_minutes: i32,

    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateLessonRequest {
    pub title: Option<String>,
    pub lesson_type: Option<LessonType>,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub course_id: Uuid,
    pub internship_id: Uuid,
    pub title: String,
    pub sort_order: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModuleResponse {
    pub module_id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub sort_order: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonResponse {
    pub lesson_id: Uuid,
    pub module_id: Uuid,
    pub title: String,
    pub lesson_type: LessonType,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: i32,
    pub sort_order: i32,
}

/// Course with its ordered modules and lessons
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseTreeResponse {
    pub course: CourseResponse,
    pub modules: Vec<ModuleTreeResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModuleTreeResponse {
    pub module: ModuleResponse,
    pub lessons: Vec<LessonResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseListResponse {
    pub courses: Vec<CourseResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl From<course::Model> for CourseResponse {
    fn from(model: course::Model) -> Self {
        Self {
            course_id: model.course_id,
            internship_id: model.internship_id,
            title: model.title,
            sort_order: model.sort_order,
        }
    }
}

impl From<course_module::Model> for ModuleResponse {
    fn from(model: course_module::Model) -> Self {
        Self {
            module_id: model.module_id,
            course_id: model.course_id,
            title: model.title,
            sort_order: model.sort_order,
        }
    }
}

impl From<lesson::Model> for LessonResponse {
    fn from(model: lesson::Model) -> Self {
        Self {
            lesson_id: model.lesson_id,
            module_id: model.module_id,
            title: model.title,
            lesson_type: model.lesson_type,
            content: model.content,
            video_url: model.video_url,
            duration_minutes: model.duration_minutes,
            sort_order: model.sort_order,
        }
    }
}
