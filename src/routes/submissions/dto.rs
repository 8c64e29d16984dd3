use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::SubmissionStatus;
use crate::entities::submission;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateSubmissionRequest {
    pub lesson_id: Uuid,

    pub content: String,

    pub file_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ReviewSubmissionRequest {
    #[schema(example = "Approved")]
    pub status: SubmissionStatus,

    pub mentor_feedback: Option<String>,

    #[schema(example = "A")]
    pub grade: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionResponse {
    pub submission_id: Uuid,
    pub user_id: Uuid,
    pub lesson_id: Uuid,
    pub content: String,
    pub file_url: Option<String>,
    pub status: SubmissionStatus,
    pub mentor_feedback: Option<String>,
    pub grade: Option<String>,
    pub submitted_at: chrono::NaiveDateTime,
    pub reviewed_at: Option<chrono::NaiveDateTime>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewSubmissionResponse {
    pub submission: SubmissionResponse,
    /// Set when the approval finished the course and issued a certificate
    pub certificate_code: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionListResponse {
    pub submissions: Vec<SubmissionResponse>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SubmissionQueryParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub status: Option<SubmissionStatus>,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

impl From<submission::Model> for SubmissionResponse {
    fn from(model: submission::Model) -> Self {
        Self {
            submission_id: model.submission_id,
            user_id: model.user_id,
            lesson_id: model.lesson_id,
            content: model.content,
            file_url: model.file_url,
            status: model.status,
            mentor_feedback: model.mentor_feedback,
            grade: model.grade,
            submitted_at: model.submitted_at,
            reviewed_at: model.reviewed_at,
        }
    }
}
