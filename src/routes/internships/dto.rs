use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::internship;
use crate::entities::sea_orm_active_enums::TrackEnum;
use crate::tracks::track_info;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateInternshipRequest {
    #[schema(example = "Full Stack Development Internship")]
    pub title: String,

    #[schema(example = "FullStack")]
    pub track: TrackEnum,

    /// Price in minor currency units
    #[schema(example = 499900)]
    pub price: i64,

    #[schema(example = 12)]
    pub duration_weeks: i32,

    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateInternshipRequest {
    pub title: Option<String>,
    pub track: Option<TrackEnum>,
    pub price: Option<i64>,
    pub duration_weeks: Option<i32>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InternshipResponse {
    pub internship_id: Uuid,
    pub title: String,
    pub track: TrackEnum,
    pub price: i64,
    pub duration_weeks: i32,
    pub description: String,
    pub is_active: bool,
    /// Static metadata looked up from the track configuration
    pub skills: Vec<String>,
    pub roles: Vec<String>,
    pub tags: Vec<String>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InternshipListResponse {
    pub internships: Vec<InternshipResponse>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteInternshipResponse {
    pub success: bool,
    pub message: String,
}

impl From<internship::Model> for InternshipResponse {
    fn from(model: internship::Model) -> Self {
        let info = track_info(&model.track);
        Self {
            internship_id: model.internship_id,
            title: model.title,
            track: model.track,
            price: model.price,
            duration_weeks: model.duration_weeks,
            description: model.description,
            is_active: model.is_active,
            skills: info.skills.iter().map(|s| s.to_string()).collect(),
            roles: info.roles.iter().map(|s| s.to_string()).collect(),
            tags: info.tags.iter().map(|s| s.to_string()).collect(),
            created_at: model.created_at,
        }
    }
}
