use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::get,
};

use super::dto::{
    CreateInternshipRequest, DeleteInternshipResponse, InternshipListResponse, InternshipResponse,
    UpdateInternshipRequest,
};
use crate::extractor::AuthClaims;
use crate::repositories::{InternshipRepository, InternshipUpdate};
use crate::utils::jwt::UserRole;

pub fn create_route() -> Router {
    Router::new()
        .route(
            "/api/v1/internships",
            get(get_internships).post(create_internship),
        )
        .route(
            "/api/v1/internships/{internship_id}",
            get(get_internship)
                .patch(update_internship)
                .delete(delete_internship),
        )
}

/// Public program listing - only active internships
#[utoipa::path(
    get,
    path = "/api/v1/internships",
    responses(
        (status = 200, description = "Internships retrieved successfully", body = InternshipListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Internships"
)]
pub async fn get_internships()
-> Result<(StatusCode, Json<InternshipListResponse>), (StatusCode, String)> {
    let internship_repo = InternshipRepository::new();
    let internships = internship_repo.find_all(true).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to get internships: {}", e),
        )
    })?;

    let internships: Vec<InternshipResponse> = internships.into_iter().map(Into::into).collect();
    let total = internships.len();

    Ok((
        StatusCode::OK,
        Json(InternshipListResponse { internships, total }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/internships/{internship_id}",
    responses(
        (status = 200, description = "Internship retrieved successfully", body = InternshipResponse),
        (status = 404, description = "Internship not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Internships"
)]
pub async fn get_internship(
    Path(internship_id): Path<String>,
) -> Result<(StatusCode, Json<InternshipResponse>), (StatusCode, String)> {
    let internship_id = uuid::Uuid::parse_str(&internship_id).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid internship_id: {}", e),
        )
    })?;

    let internship_repo = InternshipRepository::new();
    let internship = internship_repo
        .find_by_id(internship_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get internship: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Internship not found".to_string()))?;

    Ok((StatusCode::OK, Json(internship.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/internships",
    request_body = CreateInternshipRequest,
    responses(
        (status = 201, description = "Internship created successfully", body = InternshipResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Internships"
)]
pub async fn create_internship(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<CreateInternshipRequest>,
) -> Result<(StatusCode, Json<InternshipResponse>), (StatusCode, String)> {
    if auth_claims.role != UserRole::ADMIN {
        return Err((
            StatusCode::FORBIDDEN,
            "Only admins can create internships".to_string(),
        ));
    }

    if payload.title.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Title cannot be empty".to_string()));
    }
    if payload.price < 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "Price cannot be negative".to_string(),
        ));
    }

    let internship_repo = InternshipRepository::new();
    let internship = internship_repo
        .create(
            payload.title,
            payload.track,
            payload.price,
            payload.duration_weeks,
            payload.description,
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create internship: {}", e),
            )
        })?;

    Ok((StatusCode::CREATED, Json(internship.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/internships/{internship_id}",
    request_body = UpdateInternshipRequest,
    responses(
        (status = 200, description = "Internship updated successfully", body = InternshipResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Internship not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Internships"
)]
pub async fn update_internship(
    AuthClaims(auth_claims): AuthClaims,
    Path(internship_id): Path<String>,
    Json(payload): Json<UpdateInternshipRequest>,
) -> Result<(StatusCode, Json<InternshipResponse>), (StatusCode, String)> {
    if auth_claims.role != UserRole::ADMIN {
        return Err((
            StatusCode::FORBIDDEN,
            "Only admins can update internships".to_string(),
        ));
    }

    let internship_id = uuid::Uuid::parse_str(&internship_id).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid internship_id: {}", e),
        )
    })?;

    let internship_repo = InternshipRepository::new();
    let internship = internship_repo
        .update(
            internship_id,
            InternshipUpdate {
                title: payload.title,
                track: payload.track,
                price: payload.price,
                duration_weeks: payload.duration_weeks,
                description: payload.description,
                is_active: payload.is_active,
            },
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update internship: {}", e),
            )
        })?;

    Ok((StatusCode::OK, Json(internship.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/internships/{internship_id}",
    responses(
        (status = 200, description = "Internship deleted successfully", body = DeleteInternshipResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Internships"
)]
pub async fn delete_internship(
    AuthClaims(auth_claims): AuthClaims,
    Path(internship_id): Path<String>,
) -> Result<(StatusCode, Json<DeleteInternshipResponse>), (StatusCode, String)> {
    if auth_claims.role != UserRole::ADMIN {
        return Err((
            StatusCode::FORBIDDEN,
            "Only admins can delete internships".to_string(),
        ));
    }

    let internship_id = uuid::Uuid::parse_str(&internship_id).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid internship_id: {}", e),
        )
    })?;

    let internship_repo = InternshipRepository::new();
    internship_repo.delete(internship_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete internship: {}", e),
        )
    })?;

    Ok((
        StatusCode::OK,
        Json(DeleteInternshipResponse {
            success: true,
            message: "Internship deleted successfully".to_string(),
        }),
    ))
}
