use crate::entities::sea_orm_active_enums::RoleEnum;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "Priya")]
    pub first_name: String,

    #[schema(example = "Sharma")]
    pub last_name: String,

    #[schema(example = "priya@example.com")]
    pub email: String,

    #[schema(example = "password123")]
    pub password: String,

    #[schema(example = "Student")]
    pub role: RoleEnum,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,

    pub last_name: Option<String>,

    pub email: Option<String>,

    /// New password (optional) - will be hashed
    pub password: Option<String>,

    pub role: Option<RoleEnum>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserDetailResponse {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: RoleEnum,
    pub learning_streak: i32,
    pub total_time_spent_minutes: i64,
    pub referral_code: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserDetailResponse>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct UserQueryParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub role: Option<RoleEnum>,
    pub search: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteUserResponse {
    pub success: bool,
    pub message: String,
}

impl From<crate::entities::user::Model> for UserDetailResponse {
    fn from(user: crate::entities::user::Model) -> Self {
        Self {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            learning_streak: user.learning_streak,
            total_time_spent_minutes: user.total_time_spent_minutes,
            referral_code: user.referral_code,
            created_at: user.create_at,
            updated_at: user.update_at,
        }
    }
}
