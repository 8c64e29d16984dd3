use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post},
};
use std::collections::HashMap;

use super::dto::{CompleteLessonResponse, CourseProgressResponse, LessonProgressItem};
use crate::eligibility::trigger::evaluate_after_lesson_completion;
use crate::entities::sea_orm_active_enums::LessonType;
use crate::extractor::AuthClaims;
use crate::repositories::{
    ApplicationRepository, CourseRepository, LessonRepository, ProgressRepository, UserRepository,
};

pub fn create_route() -> Router {
    Router::new()
        .route(
            "/api/v1/progress/lessons/{lesson_id}/complete",
            post(complete_lesson),
        )
        .route(
            "/api/v1/progress/courses/{course_id}",
            get(get_course_progress),
        )
}

/// Marks a lesson complete and runs the certificate eligibility check for
/// the owning course.
#[utoipa::path(
    post,
    path = "/api/v1/progress/lessons/{lesson_id}/complete",
    responses(
        (status = 200, description = "Lesson marked complete", body = CompleteLessonResponse),
        (status = 404, description = "Lesson not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Progress"
)]
pub async fn complete_lesson(
    AuthClaims(auth_claims): AuthClaims,
    Path(lesson_id): Path<String>,
) -> Result<(StatusCode, Json<CompleteLessonResponse>), (StatusCode, String)> {
    let user_id = uuid::Uuid::parse_str(&auth_claims.user_id).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Invalid user_id: {}", e),
        )
    })?;

    let lesson_id = uuid::Uuid::parse_str(&lesson_id)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid lesson_id: {}", e)))?;

    let lesson_repo = LessonRepository::new();
    let lesson = lesson_repo
        .find_by_id(lesson_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get lesson: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Lesson not found".to_string()))?;

    let progress_repo = ProgressRepository::new();
    progress_repo
        .mark_completed(user_id, lesson_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to record progress: {}", e),
            )
        })?;

    // Everything past this point is best-effort bookkeeping; the completion
    // itself already succeeded
    let user_repo = UserRepository::new();
    if let Err(e) = user_repo
        .add_time_spent(user_id, lesson.duration_minutes as i64)
        .await
    {
        tracing::error!("Failed to update time spent for {}: {}", user_id, e);
    }

    let course_repo = CourseRepository::new();
    match course_repo.find_module_by_id(lesson.module_id).await {
        Ok(Some(module)) => {
            if let Ok(Some(course)) = course_repo.find_by_id(module.course_id).await {
                let application_repo = ApplicationRepository::new();
                if let Err(e) = application_repo
                    .mark_in_progress_if_enrolled(user_id, course.internship_id)
                    .await
                {
                    tracing::error!("Failed to flip application to InProgress: {}", e);
                }
            }
        }
        Ok(None) => {
            tracing::warn!("Lesson {} belongs to unknown module", lesson_id);
        }
        Err(e) => {
            tracing::error!("Failed to resolve module for lesson {}: {}", lesson_id, e);
        }
    }

    let certificate = evaluate_after_lesson_completion(user_id, lesson.module_id).await;

    Ok((
        StatusCode::OK,
        Json(CompleteLessonResponse {
            success: true,
            message: "Lesson marked complete".to_string(),
            certificate_code: certificate.map(|c| c.unique_code),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/progress/courses/{course_id}",
    responses(
        (status = 200, description = "Course progress retrieved", body = CourseProgressResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Progress"
)]
pub async fn get_course_progress(
    AuthClaims(auth_claims): AuthClaims,
    Path(course_id): Path<String>,
) -> Result<(StatusCode, Json<CourseProgressResponse>), (StatusCode, String)> {
    let user_id = uuid::Uuid::parse_str(&auth_claims.user_id).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Invalid user_id: {}", e),
        )
    })?;

    let course_id = uuid::Uuid::parse_str(&course_id)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid course_id: {}", e)))?;

    let course_repo = CourseRepository::new();
    course_repo
        .find_by_id(course_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get course: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Course not found".to_string()))?;

    let modules = course_repo
        .find_modules_by_course(course_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get modules: {}", e),
            )
        })?;

    let lesson_repo = LessonRepository::new();
    let lessons = lesson_repo
        .find_by_modules(modules.into_iter().map(|m| m.module_id).collect())
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get lessons: {}", e),
            )
        })?;

    let progress_repo = ProgressRepository::new();
    let progress_rows = progress_repo
        .find_for_lessons(user_id, lessons.iter().map(|l| l.lesson_id).collect())
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get progress: {}", e),
            )
        })?;

    let progress_by_lesson: HashMap<uuid::Uuid, _> = progress_rows
        .into_iter()
        .map(|p| (p.lesson_id, p))
        .collect();

    let mut completed_lessons = 0;
    let mut gating_total = 0;
    let mut gating_completed = 0;
    let mut items = Vec::with_capacity(lessons.len());

    for lesson in lessons {
        let progress = progress_by_lesson.get(&lesson.lesson_id);
        let completed = progress.map(|p| p.completed).unwrap_or(false);

        if completed {
            completed_lessons += 1;
        }
        if lesson.lesson_type == LessonType::Task {
            gating_total += 1;
            if completed {
                gating_completed += 1;
            }
        }

        items.push(LessonProgressItem {
            lesson_id: lesson.lesson_id,
            title: lesson.title,
            lesson_type: lesson.lesson_type,
            completed,
            completed_at: progress.and_then(|p| p.completed_at),
        });
    }

    Ok((
        StatusCode::OK,
        Json(CourseProgressResponse {
            course_id,
            total_lessons: items.len(),
            completed_lessons,
            gating_lessons_total: gating_total,
            gating_lessons_completed: gating_completed,
            lessons: items,
        }),
    ))
}
