use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::application;
use crate::entities::sea_orm_active_enums::{ApplicationStatus, PaymentStatus};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateApplicationRequest {
    pub internship_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicationResponse {
    pub application_id: Uuid,
    pub user_id: Uuid,
    pub internship_id: Uuid,
    pub status: ApplicationStatus,
    pub eligibility_score: Option<i32>,
    pub interview_score: Option<i32>,
    pub mentor_id: Option<Uuid>,
    pub payment_status: PaymentStatus,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicationListResponse {
    pub applications: Vec<ApplicationResponse>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ApplicationQueryParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub status: Option<ApplicationStatus>,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AssignMentorRequest {
    pub mentor_id: Uuid,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct EligibilityAnswer {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct EligibilityTestRequest {
    pub answers: Vec<EligibilityAnswer>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EligibilityTestResponse {
    pub score: i32,
    pub passed: bool,
    pub status: ApplicationStatus,
}

impl From<application::Model> for ApplicationResponse {
    fn from(model: application::Model) -> Self {
        Self {
            application_id: model.application_id,
            user_id: model.user_id,
            internship_id: model.internship_id,
            status: model.status,
            eligibility_score: model.eligibility_score,
            interview_score: model.interview_score,
            mentor_id: model.mentor_id,
            payment_status: model.payment_status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
