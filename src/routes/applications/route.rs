use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, patch, post},
};

use super::dto::{
    ApplicationListResponse, ApplicationQueryParams, ApplicationResponse, AssignMentorRequest,
    CreateApplicationRequest, EligibilityTestRequest, EligibilityTestResponse,
};
use crate::config::ELIGIBILITY_PASS_SCORE;
use crate::entities::sea_orm_active_enums::{ApplicationStatus, RoleEnum};
use crate::extractor::AuthClaims;
use crate::interview_service::InterviewService;
use crate::repositories::{ApplicationRepository, InternshipRepository, UserRepository};
use crate::utils::jwt::UserRole;

pub fn create_route() -> Router {
    Router::new()
        .route(
            "/api/v1/applications",
            post(create_application).get(get_my_applications),
        )
        .route("/api/v1/applications/all", get(get_all_applications))
        .route(
            "/api/v1/applications/{application_id}/mentor",
            patch(assign_mentor),
        )
        .route(
            "/api/v1/applications/{application_id}/eligibility-test",
            post(submit_eligibility_test),
        )
}

#[utoipa::path(
    post,
    path = "/api/v1/applications",
    request_body = CreateApplicationRequest,
    responses(
        (status = 201, description = "Application created successfully", body = ApplicationResponse),
        (status = 404, description = "Internship not found"),
        (status = 409, description = "Application already exists"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn create_application(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationResponse>), (StatusCode, String)> {
    let user_id = uuid::Uuid::parse_str(&auth_claims.user_id).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Invalid user_id: {}", e),
        )
    })?;

    let internship_repo = InternshipRepository::new();
    let internship = internship_repo
        .find_by_id(payload.internship_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get internship: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Internship not found".to_string()))?;

    if !internship.is_active {
        return Err((
            StatusCode::BAD_REQUEST,
            "Internship is not accepting applications".to_string(),
        ));
    }

    let application_repo = ApplicationRepository::new();
    let existing = application_repo
        .find_by_user_and_internship(user_id, payload.internship_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to check existing application: {}", e),
            )
        })?;

    if existing.is_some() {
        return Err((
            StatusCode::CONFLICT,
            "You have already applied to this internship".to_string(),
        ));
    }

    let application = application_repo
        .create(user_id, payload.internship_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create application: {}", e),
            )
        })?;

    Ok((StatusCode::CREATED, Json(application.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/applications",
    responses(
        (status = 200, description = "Applications retrieved successfully", body = ApplicationListResponse),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn get_my_applications(
    AuthClaims(auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<ApplicationListResponse>), (StatusCode, String)> {
    let user_id = uuid::Uuid::parse_str(&auth_claims.user_id).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Invalid user_id: {}", e),
        )
    })?;

    let application_repo = ApplicationRepository::new();
    let applications = application_repo.find_by_user(user_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to get applications: {}", e),
        )
    })?;

    let applications: Vec<ApplicationResponse> =
        applications.into_iter().map(Into::into).collect();
    let total = applications.len() as u64;

    Ok((
        StatusCode::OK,
        Json(ApplicationListResponse {
            applications,
            total,
            page: 1,
            page_size: total as u32,
            total_pages: 1,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/applications/all",
    params(ApplicationQueryParams),
    responses(
        (status = 200, description = "All applications retrieved successfully", body = ApplicationListResponse),
        (status = 403, description = "Forbidden - Mentor/Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn get_all_applications(
    AuthClaims(auth_claims): AuthClaims,
    Query(params): Query<ApplicationQueryParams>,
) -> Result<(StatusCode, Json<ApplicationListResponse>), (StatusCode, String)> {
    if auth_claims.role != UserRole::MENTOR && auth_claims.role != UserRole::ADMIN {
        return Err((
            StatusCode::FORBIDDEN,
            "Only mentors and admins can view all applications".to_string(),
        ));
    }

    let page = if params.page == 0 { 1 } else { params.page };
    let page_size = if params.page_size == 0 || params.page_size > 100 {
        20
    } else {
        params.page_size
    };

    let application_repo = ApplicationRepository::new();
    let (applications, total) = application_repo
        .find_all_with_pagination(page, page_size, params.status)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get applications: {}", e),
            )
        })?;

    let total_pages = (total as f64 / page_size as f64).ceil() as u64;

    Ok((
        StatusCode::OK,
        Json(ApplicationListResponse {
            applications: applications.into_iter().map(Into::into).collect(),
            total,
            page,
            page_size,
            total_pages,
        }),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/v1/applications/{application_id}/mentor",
    request_body = AssignMentorRequest,
    responses(
        (status = 200, description = "Mentor assigned successfully", body = ApplicationResponse),
        (status = 400, description = "User is not a mentor"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Application not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn assign_mentor(
    AuthClaims(auth_claims): AuthClaims,
    Path(application_id): Path<String>,
    Json(payload): Json<AssignMentorRequest>,
) -> Result<(StatusCode, Json<ApplicationResponse>), (StatusCode, String)> {
    if auth_claims.role != UserRole::ADMIN {
        return Err((
            StatusCode::FORBIDDEN,
            "Only admins can assign mentors".to_string(),
        ));
    }

    let application_id = uuid::Uuid::parse_str(&application_id).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid application_id: {}", e),
        )
    })?;

    let user_repo = UserRepository::new();
    let mentor = user_repo
        .find_by_id(payload.mentor_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get mentor: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Mentor not found".to_string()))?;

    if mentor.role != RoleEnum::Mentor {
        return Err((
            StatusCode::BAD_REQUEST,
            "Assigned user is not a mentor".to_string(),
        ));
    }

    let application_repo = ApplicationRepository::new();
    let application = application_repo
        .assign_mentor(application_id, payload.mentor_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to assign mentor: {}", e),
            )
        })?;

    Ok((StatusCode::OK, Json(application.into())))
}

/// Scores the eligibility test through the chat-completion API and advances
/// a Pending application when the score clears the pass mark.
#[utoipa::path(
    post,
    path = "/api/v1/applications/{application_id}/eligibility-test",
    request_body = EligibilityTestRequest,
    responses(
        (status = 200, description = "Eligibility test scored", body = EligibilityTestResponse),
        (status = 400, description = "Application is not awaiting the eligibility test"),
        (status = 404, description = "Application not found"),
        (status = 502, description = "Scoring service unavailable"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn submit_eligibility_test(
    AuthClaims(auth_claims): AuthClaims,
    Path(application_id): Path<String>,
    Json(payload): Json<EligibilityTestRequest>,
) -> Result<(StatusCode, Json<EligibilityTestResponse>), (StatusCode, String)> {
    let application_id = uuid::Uuid::parse_str(&application_id).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid application_id: {}", e),
        )
    })?;

    if payload.answers.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Answers cannot be empty".to_string(),
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

    if application.status != ApplicationStatus::Pending {
        return Err((
            StatusCode::BAD_REQUEST,
            "Application is not awaiting the eligibility test".to_string(),
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

    let answers_text = payload
        .answers
        .iter()
        .map(|a| format!("Q: {}\nA: {}", a.question, a.answer))
        .collect::<Vec<_>>()
        .join("\n\n");

    let interview_service = InterviewService::new();
    let score = interview_service
        .score_eligibility(&internship.track, &answers_text)
        .await
        .map_err(|e| {
            (
                StatusCode::BAD_GATEWAY,
                format!("Failed to score eligibility test: {}", e),
            )
        })?;

    let passed = score >= ELIGIBILITY_PASS_SCORE;
    let application = application_repo
        .set_eligibility_result(application_id, score, passed)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to store eligibility result: {}", e),
            )
        })?;

    Ok((
        StatusCode::OK,
        Json(EligibilityTestResponse {
            score,
            passed,
            status: application.status,
        }),
    ))
}
