use axum::{Json, Router, http::StatusCode, routing::get};
use std::collections::HashMap;

use super::dto::{ApplicationsByStatus, OverviewStatsResponse};
use crate::entities::sea_orm_active_enums::{ApplicationStatus, RoleEnum};
use crate::extractor::AuthClaims;
use crate::repositories::{
    ApplicationRepository, CertificateRepository, InternshipRepository, UserRepository,
};
use crate::utils::jwt::UserRole;

pub fn create_route() -> Router {
    Router::new().route("/api/v1/stats/overview", get(get_overview_stats))
}

#[utoipa::path(
    get,
    path = "/api/v1/stats/overview",
    responses(
        (status = 200, description = "Admin overview statistics", body = OverviewStatsResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Statistics"
)]
pub async fn get_overview_stats(
    AuthClaims(auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<OverviewStatsResponse>), (StatusCode, String)> {
    if auth_claims.role != UserRole::ADMIN {
        return Err((
            StatusCode::FORBIDDEN,
            "Only admins can view statistics".to_string(),
        ));
    }

    let internal = |e: anyhow::Error| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to compute statistics: {}", e),
        )
    };

    let user_repo = UserRepository::new();
    let total_students = user_repo
        .count_by_role(RoleEnum::Student)
        .await
        .map_err(internal)?;
    let total_mentors = user_repo
        .count_by_role(RoleEnum::Mentor)
        .await
        .map_err(internal)?;

    let internship_repo = InternshipRepository::new();
    let active_internships = internship_repo.count_active().await.map_err(internal)?;

    let application_repo = ApplicationRepository::new();
    let applications_by_status = ApplicationsByStatus {
        pending: application_repo
            .count_by_status(ApplicationStatus::Pending)
            .await
            .map_err(internal)?,
        eligibility_passed: application_repo
            .count_by_status(ApplicationStatus::EligibilityPassed)
            .await
            .map_err(internal)?,
        interview_passed: application_repo
            .count_by_status(ApplicationStatus::InterviewPassed)
            .await
            .map_err(internal)?,
        enrolled: application_repo
            .count_by_status(ApplicationStatus::Enrolled)
            .await
            .map_err(internal)?,
        in_progress: application_repo
            .count_by_status(ApplicationStatus::InProgress)
            .await
            .map_err(internal)?,
        completed: application_repo
            .count_by_status(ApplicationStatus::Completed)
            .await
            .map_err(internal)?,
    };

    let certificate_repo = CertificateRepository::new();
    let certificates_issued = certificate_repo.count().await.map_err(internal)?;

    // Revenue = sum of internship prices over paid applications
    let paid_applications = application_repo.find_paid().await.map_err(internal)?;
    let mut price_cache: HashMap<uuid::Uuid, i64> = HashMap::new();
    let mut revenue: i64 = 0;
    for application in &paid_applications {
        let price = match price_cache.get(&application.internship_id) {
            Some(price) => *price,
            None => {
                let price = internship_repo
                    .find_by_id(application.internship_id)
                    .await
                    .map_err(internal)?
                    .map(|i| i.price)
                    .unwrap_or(0);
                price_cache.insert(application.internship_id, price);
                price
            }
        };
        revenue += price;
    }

    Ok((
        StatusCode::OK,
        Json(OverviewStatsResponse {
            total_students,
            total_mentors,
            active_internships,
            applications_by_status,
            certificates_issued,
            revenue,
        }),
    ))
}
