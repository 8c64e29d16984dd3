use axum::{Json, Router, http::StatusCode, routing::get};

use super::dto::{DashboardApplication, DashboardResponse, RecentCompletion};
use crate::extractor::AuthClaims;
use crate::repositories::{
    ApplicationRepository, CertificateRepository, InternshipRepository, ProgressRepository,
    UserRepository,
};

pub fn create_route() -> Router {
    Router::new().route("/api/v1/dashboard", get(get_dashboard))
}

/// Student dashboard. Every load touches the learning streak: a new
/// calendar day within the streak window increments it, a longer gap resets
/// it to 1.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard retrieved", body = DashboardResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn get_dashboard(
    AuthClaims(auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<DashboardResponse>), (StatusCode, String)> {
    let user_id = uuid::Uuid::parse_str(&auth_claims.user_id).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Invalid user_id: {}", e),
        )
    })?;

    let user_repo = UserRepository::new();
    let user = user_repo.touch_streak(user_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to update streak: {}", e),
        )
    })?;

    let application_repo = ApplicationRepository::new();
    let applications = application_repo.find_by_user(user_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to get applications: {}", e),
        )
    })?;

    let internship_repo = InternshipRepository::new();
    let mut dashboard_applications = Vec::with_capacity(applications.len());
    for application in applications {
        let title = internship_repo
            .find_by_id(application.internship_id)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to get internship: {}", e),
                )
            })?
            .map(|i| i.title)
            .unwrap_or_else(|| "Unknown program".to_string());

        dashboard_applications.push(DashboardApplication {
            application_id: application.application_id,
            internship_id: application.internship_id,
            internship_title: title,
            status: application.status,
        });
    }

    let certificate_repo = CertificateRepository::new();
    let certificates = certificate_repo.find_by_user(user_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to get certificates: {}", e),
        )
    })?;

    let progress_repo = ProgressRepository::new();
    let recent = progress_repo
        .find_recent_for_user(user_id, 5)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get recent progress: {}", e),
            )
        })?;

    Ok((
        StatusCode::OK,
        Json(DashboardResponse {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            learning_streak: user.learning_streak,
            total_time_spent_minutes: user.total_time_spent_minutes,
            referral_code: user.referral_code,
            applications: dashboard_applications,
            certificates_earned: certificates.len(),
            recent_completions: recent
                .into_iter()
                .map(|p| RecentCompletion {
                    lesson_id: p.lesson_id,
                    completed_at: p.completed_at,
                })
                .collect(),
        }),
    ))
}
