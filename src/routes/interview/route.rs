use axum::{Json, Router, extract::Path, http::StatusCode, routing::post};

use super::dto::{InterviewTurnRequest, InterviewTurnResponse};
use crate::entities::sea_orm_active_enums::ApplicationStatus;
use crate::extractor::AuthClaims;
use crate::interview_service::{InterviewOutcome, InterviewService};
use crate::repositories::{ApplicationRepository, InternshipRepository};

pub fn create_route() -> Router {
    Router::new().route(
        "/api/v1/applications/{application_id}/interview",
        post(interview_turn),
    )
}

/// One turn of the AI interview for an application that has passed the
/// eligibility test.
#[utoipa::path(
    post,
    path = "/api/v1/applications/{application_id}/interview",
    request_body = InterviewTurnRequest,
    responses(
        (status = 200, description = "Interview turn processed", body = InterviewTurnResponse),
        (status = 400, description = "Application is not awaiting the interview"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Application not found"),
        (status = 502, description = "Interview service unavailable"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Interview"
)]
pub async fn interview_turn(
    AuthClaims(auth_claims): AuthClaims,
    Path(application_id): Path<String>,
    Json(payload): Json<InterviewTurnRequest>,
) -> Result<(StatusCode, Json<InterviewTurnResponse>), (StatusCode, String)> {
    let application_id = uuid::Uuid::parse_str(&application_id).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid application_id: {}", e),
        )
    })?;

    if payload.messages.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Messages cannot be empty".to_string(),
        ));
    }

    let application_repo = ApplicationRepository::new();
    let application = application_repo
        .find_by_id(application_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get application: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Application not found".to_string()))?;

    if application.user_id.to_string() != auth_claims.user_id {
        return Err((StatusCode::FORBIDDEN, "Access denied".to_string()));
    }

    if application.status != ApplicationStatus::EligibilityPassed {
        return Err((
            StatusCode::BAD_REQUEST,
            "Application is not awaiting the interview".to_string(),
        ));
    }

    let internship_repo = InternshipRepository::new();
    let internship = internship_repo
        .find_by_id(application.internship_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get internship: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Internship not found".to_string()))?;

    let interview_service = InterviewService::new();
    let outcome = interview_service
        .interview_turn(&internship.track, &payload.messages)
        .await
        .map_err(|e| {
            (
                StatusCode::BAD_GATEWAY,
                format!("Interview service failed: {}", e),
            )
        })?;

    match outcome {
        InterviewOutcome::InProgress { reply } => Ok((
            StatusCode::OK,
            Json(InterviewTurnResponse::InProgress { reply }),
        )),
        InterviewOutcome::Complete { score, passed } => {
            let application = application_repo
                .set_interview_result(application_id, score, passed)
                .await
                .map_err(|e| {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to store interview result: {}", e),
                    )
                })?;

            Ok((
                StatusCode::OK,
                Json(InterviewTurnResponse::Complete {
                    score,
                    passed,
                    application_status: application.status,
                }),
            ))
        }
    }
}
