use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{delete, get, patch, post},
};

use super::dto::{
    CourseListResponse, CourseResponse, CourseTreeResponse, CreateCourseRequest,
    CreateLessonRequest, CreateModuleRequest, DeleteResponse, LessonResponse, ModuleResponse,
    ModuleTreeResponse, UpdateCourseRequest, UpdateLessonRequest,
};
use crate::extractor::AuthClaims;
use crate::repositories::{CourseRepository, LessonRepository, LessonUpdate};
use crate::utils::jwt::UserRole;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/courses", post(create_course))
        .route(
            "/api/v1/courses/{course_id}",
            get(get_course).patch(update_course).delete(delete_course),
        )
        .route(
            "/api/v1/internships/{internship_id}/courses",
            get(get_internship_courses),
        )
        .route("/api/v1/courses/{course_id}/modules", post(create_module))
        .route("/api/v1/modules/{module_id}", delete(delete_module))
        .route("/api/v1/modules/{module_id}/lessons", post(create_lesson))
        .route(
            "/api/v1/lessons/{lesson_id}",
            patch(update_lesson).delete(delete_lesson),
        )
}

fn require_admin(role: UserRole) -> Result<(), (StatusCode, String)> {
    if role != UserRole::ADMIN {
        return Err((
            StatusCode::FORBIDDEN,
            "Only admins can manage course content".to_string(),
        ));
    }
    Ok(())
}

fn parse_uuid(value: &str, label: &str) -> Result<uuid::Uuid, (StatusCode, String)> {
    uuid::Uuid::parse_str(value)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid {}: {}", label, e)))
}

#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created successfully", body = CourseResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn create_course(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), (StatusCode, String)> {
    require_admin(auth_claims.role)?;

    if payload.title.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Title cannot be empty".to_string()));
    }

    let course_repo = CourseRepository::new();
    let course = course_repo
        .create(payload.internship_id, payload.title, payload.sort_order)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create course: {}", e),
            )
        })?;

    Ok((StatusCode::CREATED, Json(course.into())))
}

/// Full course tree - modules with their lessons, in sort order
#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}",
    responses(
        (status = 200, description = "Course retrieved successfully", body = CourseTreeResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn get_course(
    AuthClaims(_auth_claims): AuthClaims,
    Path(course_id): Path<String>,
) -> Result<(StatusCode, Json<CourseTreeResponse>), (StatusCode, String)> {
    let course_id = parse_uuid(&course_id, "course_id")?;

    let course_repo = CourseRepository::new();
    let lesson_repo = LessonRepository::new();

    let course = course_repo
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

    let mut module_trees = Vec::with_capacity(modules.len());
    for module in modules {
        let lessons = lesson_repo
            .find_by_module(module.module_id)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to get lessons: {}", e),
                )
            })?;

        module_trees.push(ModuleTreeResponse {
            module: ModuleResponse::from(module),
            lessons: lessons.into_iter().map(LessonResponse::from).collect(),
        });
    }

    Ok((
        StatusCode::OK,
        Json(CourseTreeResponse {
            course: course.into(),
            modules: module_trees,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/internships/{internship_id}/courses",
    responses(
        (status = 200, description = "Courses retrieved successfully", body = CourseListResponse),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn get_internship_courses(
    AuthClaims(_auth_claims): AuthClaims,
    Path(internship_id): Path<String>,
) -> Result<(StatusCode, Json<CourseListResponse>), (StatusCode, String)> {
    let internship_id = parse_uuid(&internship_id, "internship_id")?;

    let course_repo = CourseRepository::new();
    let courses = course_repo
        .find_by_internship(internship_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get courses: {}", e),
            )
        })?;

    Ok((
        StatusCode::OK,
        Json(CourseListResponse {
            courses: courses.into_iter().map(Into::into).collect(),
        }),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/v1/courses/{course_id}",
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated successfully", body = CourseResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn update_course(
    AuthClaims(auth_claims): AuthClaims,
    Path(course_id): Path<String>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), (StatusCode, String)> {
    require_admin(auth_claims.role)?;
    let course_id = parse_uuid(&course_id, "course_id")?;

    let course_repo = CourseRepository::new();
    let course = course_repo
        .update(course_id, payload.title, payload.sort_order)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update course: {}", e),
            )
        })?;

    Ok((StatusCode::OK, Json(course.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/courses/{course_id}",
    responses(
        (status = 200, description = "Course deleted successfully", body = DeleteResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn delete_course(
    AuthClaims(auth_claims): AuthClaims,
    Path(course_id): Path<String>,
) -> Result<(StatusCode, Json<DeleteResponse>), (StatusCode, String)> {
    require_admin(auth_claims.role)?;
    let course_id = parse_uuid(&course_id, "course_id")?;

    let course_repo = CourseRepository::new();
    course_repo.delete(course_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete course: {}", e),
        )
    })?;

    Ok((
        StatusCode::OK,
        Json(DeleteResponse {
            success: true,
            message: "Course deleted successfully".to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/courses/{course_id}/modules",
    request_body = CreateModuleRequest,
    responses(
        (status = 201, description = "Module created successfully", body = ModuleResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn create_module(
    AuthClaims(auth_claims): AuthClaims,
    Path(course_id): Path<String>,
    Json(payload): Json<CreateModuleRequest>,
) -> Result<(StatusCode, Json<ModuleResponse>), (StatusCode, String)> {
    require_admin(auth_claims.role)?;
    let course_id = parse_uuid(&course_id, "course_id")?;

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

    let module = course_repo
        .create_module(course_id, payload.title, payload.sort_order)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create module: {}", e),
            )
        })?;

    Ok((StatusCode::CREATED, Json(module.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/modules/{module_id}",
    responses(
        (status = 200, description = "Module deleted successfully", body = DeleteResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn delete_module(
    AuthClaims(auth_claims): AuthClaims,
    Path(module_id): Path<String>,
) -> Result<(StatusCode, Json<DeleteResponse>), (StatusCode, String)> {
    require_admin(auth_claims.role)?;
    let module_id = parse_uuid(&module_id, "module_id")?;

    let course_repo = CourseRepository::new();
    course_repo.delete_module(module_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete module: {}", e),
        )
    })?;

    Ok((
        StatusCode::OK,
        Json(DeleteResponse {
            success: true,
            message: "Module deleted successfully".to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/modules/{module_id}/lessons",
    request_body = CreateLessonRequest,
    responses(
        (status = 201, description = "Lesson created successfully", body = LessonResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Module not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn create_lesson(
    AuthClaims(auth_claims): AuthClaims,
    Path(module_id): Path<String>,
    Json(payload): Json<CreateLessonRequest>,
) -> Result<(StatusCode, Json<LessonResponse>), (StatusCode, String)> {
    require_admin(auth_claims.role)?;
    let module_id = parse_uuid(&module_id, "module_id")?;

    let course_repo = CourseRepository::new();
    course_repo
        .find_module_by_id(module_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get module: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Module not found".to_string()))?;

    let lesson_repo = LessonRepository::new();
    let lesson = lesson_repo
        .create(
            module_id,
            payload.title,
            payload.lesson_type,
            payload.content,
            payload.video_url,
            payload.duration_minutes,
            payload.sort_order,
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create lesson: {}", e),
            )
        })?;

    Ok((StatusCode::CREATED, Json(lesson.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/lessons/{lesson_id}",
    request_body = UpdateLessonRequest,
    responses(
        (status = 200, description = "Lesson updated successfully", body = LessonResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Lesson not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn update_lesson(
    AuthClaims(auth_claims): AuthClaims,
    Path(lesson_id): Path<String>,
    Json(payload): Json<UpdateLessonRequest>,
) -> Result<(StatusCode, Json<LessonResponse>), (StatusCode, String)> {
    require_admin(auth_claims.role)?;
    let lesson_id = parse_uuid(&lesson_id, "lesson_id")?;

    let lesson_repo = LessonRepository::new();
    let lesson = lesson_repo
        .update(
            lesson_id,
            LessonUpdate {
                title: payload.title,
                lesson_type: payload.lesson_type,
                content: payload.content,
                video_url: payload.video_url,
                duration_minutes: payload.duration_minutes,
                sort_order: payload.sort_order,
            },
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update lesson: {}", e),
            )
        })?;

    Ok((StatusCode::OK, Json(lesson.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/lessons/{lesson_id}",
    responses(
        (status = 200, description = "Lesson deleted successfully", body = DeleteResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn delete_lesson(
    AuthClaims(auth_claims): AuthClaims,
    Path(lesson_id): Path<String>,
) -> Result<(StatusCode, Json<DeleteResponse>), (StatusCode, String)> {
    require_admin(auth_claims.role)?;
    let lesson_id = parse_uuid(&lesson_id, "lesson_id")?;

    let lesson_repo = LessonRepository::new();
    lesson_repo.delete(lesson_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete lesson: {}", e),
        )
    })?;

    Ok((
        StatusCode::OK,
        Json(DeleteResponse {
            success: true,
            message: "Lesson deleted successfully".to_string(),
        }),
    ))
}
