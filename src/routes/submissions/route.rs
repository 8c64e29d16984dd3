use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, patch, post},
};
use super::dto::{
    CreateSubmissionRequest, ReviewSubmissionRequest, ReviewSubmissionResponse,
    SubmissionListResponse, SubmissionQueryParams, SubmissionResponse,
};
use crate::eligibility::trigger::evaluate_after_lesson_completion;
use crate::entities::sea_orm_active_enums::{LessonType, SubmissionStatus};
use crate::entities::{lesson, submission};
use crate::extractor::AuthClaims;
use crate::repositories::{
    ApplicationRepository, CourseRepository, LessonRepository, ProgressRepository,
    SubmissionRepository, UserRepository,
};
use crate::utils::jwt::UserRole;

pub fn create_route() -> Router {
    Router::new()
        .route(
            "/api/v1/submissions",
            post(create_submission).get(get_my_submissions),
        )
        .route("/api/v1/submissions/all", get(get_all_submissions))
        .route(
            "/api/v1/submissions/{submission_id}",
            patch(review_submission),
        )
}

#[utoipa::path(
    post,
    path = "/api/v1/submissions",
    request_body = CreateSubmissionRequest,
    responses(
        (status = 201, description = "Submission created", body = SubmissionResponse),
        (status = 400, description = "Lesson is not a task"),
        (status = 404, description = "Lesson not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Submissions"
)]
pub async fn create_submission(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<CreateSubmissionRequest>,
) -> Result<(StatusCode, Json<SubmissionResponse>), (StatusCode, String)> {
    let user_id = uuid::Uuid::parse_str(&auth_claims.user_id).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Invalid user_id: {}", e),
        )
    })?;

    if payload.content.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Content cannot be empty".to_string(),
        ));
    }

    let lesson_repo = LessonRepository::new();
    let lesson = lesson_repo
        .find_by_id(payload.lesson_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get lesson: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Lesson not found".to_string()))?;

    if lesson.lesson_type != LessonType::Task {
        return Err((
            StatusCode::BAD_REQUEST,
            "Submissions are only accepted for task lessons".to_string(),
        ));
    }

    let submission_repo = SubmissionRepository::new();
    let submission = submission_repo
        .submit(user_id, payload.lesson_id, payload.content, payload.file_url)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create submission: {}", e),
            )
        })?;

    Ok((StatusCode::CREATED, Json(submission.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/submissions",
    responses(
        (status = 200, description = "Submissions retrieved", body = SubmissionListResponse),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Submissions"
)]
pub async fn get_my_submissions(
    AuthClaims(auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<SubmissionListResponse>), (StatusCode, String)> {
    let user_id = uuid::Uuid::parse_str(&auth_claims.user_id).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Invalid user_id: {}", e),
        )
    })?;

    let submission_repo = SubmissionRepository::new();
    let submissions = submission_repo.find_by_user(user_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to get submissions: {}", e),
        )
    })?;

    let submissions: Vec<SubmissionResponse> = submissions.into_iter().map(Into::into).collect();
    let total = submissions.len() as u64;

    Ok((
        StatusCode::OK,
        Json(SubmissionListResponse {
            submissions,
            total,
            page: 1,
            page_size: total as u32,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/submissions/all",
    params(SubmissionQueryParams),
    responses(
        (status = 200, description = "All submissions retrieved", body = SubmissionListResponse),
        (status = 403, description = "Forbidden - Mentor/Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Submissions"
)]
pub async fn get_all_submissions(
    AuthClaims(auth_claims): AuthClaims,
    Query(params): Query<SubmissionQueryParams>,
) -> Result<(StatusCode, Json<SubmissionListResponse>), (StatusCode, String)> {
    if auth_claims.role != UserRole::MENTOR && auth_claims.role != UserRole::ADMIN {
        return Err((
            StatusCode::FORBIDDEN,
            "Only mentors and admins can view all submissions".to_string(),
        ));
    }

    let page = if params.page == 0 { 1 } else { params.page };
    let page_size = if params.page_size == 0 || params.page_size > 100 {
        20
    } else {
        params.page_size
    };

    let submission_repo = SubmissionRepository::new();
    let (submissions, total) = submission_repo
        .find_all_with_pagination(page, page_size, params.status)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get submissions: {}", e),
            )
        })?;

    Ok((
        StatusCode::OK,
        Json(SubmissionListResponse {
            submissions: submissions.into_iter().map(Into::into).collect(),
            total,
            page,
            page_size,
        }),
    ))
}

/// Mentor review. Any status can be set; Approved additionally marks the
/// lesson complete and runs the certificate eligibility check.
#[utoipa::path(
    patch,
    path = "/api/v1/submissions/{submission_id}",
    request_body = ReviewSubmissionRequest,
    responses(
        (status = 200, description = "Submission reviewed", body = ReviewSubmissionResponse),
        (status = 403, description = "Forbidden - not the assigned mentor"),
        (status = 404, description = "Submission not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Submissions"
)]
pub async fn review_submission(
    AuthClaims(auth_claims): AuthClaims,
    Path(submission_id): Path<String>,
    Json(payload): Json<ReviewSubmissionRequest>,
) -> Result<(StatusCode, Json<ReviewSubmissionResponse>), (StatusCode, String)> {
    if auth_claims.role != UserRole::MENTOR && auth_claims.role != UserRole::ADMIN {
        return Err((
            StatusCode::FORBIDDEN,
            "Only mentors and admins can review submissions".to_string(),
        ));
    }

    let submission_id = uuid::Uuid::parse_str(&submission_id).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid submission_id: {}", e),
        )
    })?;

    let submission_repo = SubmissionRepository::new();
    let submission = submission_repo
        .find_by_id(submission_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get submission: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Submission not found".to_string()))?;

    let lesson_repo = LessonRepository::new();
    let lesson = lesson_repo
        .find_by_id(submission.lesson_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get lesson: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Lesson not found".to_string()))?;

    // Mentors may only review submissions of applications assigned to them
    if auth_claims.role == UserRole::MENTOR {
        ensure_assigned_mentor(&auth_claims.user_id, &submission, &lesson).await?;
    }

    let reviewed = submission_repo
        .update_review(
            submission_id,
            payload.status,
            payload.mentor_feedback,
            payload.grade,
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update submission: {}", e),
            )
        })?;

    let mut certificate_code = None;

    if reviewed.status == SubmissionStatus::Approved {
        // Approval drives the progress tracker and eligibility evaluator.
        // These are best-effort: the review itself already succeeded.
        let progress_repo = ProgressRepository::new();
        if let Err(e) = progress_repo
            .mark_completed(reviewed.user_id, reviewed.lesson_id)
            .await
        {
            tracing::error!(
                "Failed to record progress for approved submission {}: {}",
                submission_id,
                e
            );
        } else {
            let user_repo = UserRepository::new();
            if let Err(e) = user_repo
                .add_time_spent(reviewed.user_id, lesson.duration_minutes as i64)
                .await
            {
                tracing::error!("Failed to update time spent: {}", e);
            }

            certificate_code =
                evaluate_after_lesson_completion(reviewed.user_id, lesson.module_id)
                    .await
                    .map(|c| c.unique_code);
        }
    }

    Ok((
        StatusCode::OK,
        Json(ReviewSubmissionResponse {
            submission: reviewed.into(),
            certificate_code,
        }),
    ))
}

async fn ensure_assigned_mentor(
    mentor_user_id: &str,
    submission: &submission::Model,
    lesson: &lesson::Model,
) -> Result<(), (StatusCode, String)> {
    let course_repo = CourseRepository::new();
    let module = course_repo
        .find_module_by_id(lesson.module_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to resolve module: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Module not found".to_string()))?;

    let course = course_repo
        .find_by_id(module.course_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to resolve course: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Course not found".to_string()))?;

    let application_repo = ApplicationRepository::new();
    let application = application_repo
        .find_by_user_and_internship(submission.user_id, course.internship_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to resolve application: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Application not found".to_string()))?;

    let assigned = application
        .mentor_id
        .map(|mentor_id| mentor_id.to_string() == mentor_user_id)
        .unwrap_or(false);

    if !assigned {
        return Err((
            StatusCode::FORBIDDEN,
            "You are not the assigned mentor for this application".to_string(),
        ));
    }

    Ok(())
}
