use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::ApplicationStatus;
use crate::interview_service::ChatMessage;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct InterviewTurnRequest {
    /// Full conversation so far, oldest first. The exchange is stateless on
    /// the server side.
    pub messages: Vec<ChatMessage>,
}

/// Tagged interview outcome - completion is an explicit variant, never a
/// sentinel string inside the reply text.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InterviewTurnResponse {
    InProgress {
        reply: String,
    },
    Complete {
        score: i32,
        passed: bool,
        application_status: ApplicationStatus,
    },
}
