use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicationsByStatus {
    pub pending: u64,
    pub eligibility_passed: u64,
    pub interview_passed: u64,
    pub enrolled: u64,
    pub in_progress: u64,
    pub completed: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OverviewStatsResponse {
    pub total_students: u64,
    pub total_mentors: u64,
    pub active_internships: u64,
    pub applications_by_status: ApplicationsByStatus,
    pub certificates_issued: u64,
    /// Revenue from paid applications, in minor currency units
    pub revenue: i64,
}
