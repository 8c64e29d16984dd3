use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::ApplicationStatus;

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub learning_streak: i32,
    pub total_time_spent_minutes: i64,
    pub referral_code: String,
    pub applications: Vec<DashboardApplication>,
    pub certificates_earned: usize,
    pub recent_completions: Vec<RecentCompletion>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardApplication {
    pub application_id: Uuid,
    pub internship_id: Uuid,
    pub internship_title: String,
    pub status: ApplicationStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecentCompletion {
    pub lesson_id: Uuid,
    pub completed_at: Option<chrono::NaiveDateTime>,
}
