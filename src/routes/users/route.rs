use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
};

use super::dto::{
    CreateUserRequest, DeleteUserResponse, UpdateUserRequest, UserDetailResponse,
    UserListResponse, UserQueryParams,
};
use crate::config::REFERRAL_CODE_LENGTH;
use crate::extractor::AuthClaims;
use crate::repositories::{UserRepository, UserUpdate};
use crate::utils::jwt::UserRole;
use crate::utils::random::generate_reference_code;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/users", get(get_users).post(create_user))
        .route(
            "/api/v1/users/{user_id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserDetailResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Email already in use"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn create_user(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserDetailResponse>), (StatusCode, String)> {
    if auth_claims.role != UserRole::ADMIN {
        return Err((
            StatusCode::FORBIDDEN,
            "Only admins can create users".to_string(),
        ));
    }

    if payload.email.is_empty() || !payload.email.contains('@') {
        return Err((StatusCode::BAD_REQUEST, "Valid email is required".to_string()));
    }
    if payload.password.len() < 6 {
        return Err((
            StatusCode::BAD_REQUEST,
            "Password must be at least 6 characters".to_string(),
        ));
    }

    let user_repo = UserRepository::new();

    let existing = user_repo.find_by_email(&payload.email).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Database error: {}", e),
        )
    })?;
    if existing.is_some() {
        return Err((StatusCode::CONFLICT, "Email already in use".to_string()));
    }

    let hashed_password = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to hash password: {}", e),
        )
    })?;

    let user = user_repo
        .create(
            uuid::Uuid::new_v4(),
            payload.first_name,
            payload.last_name,
            payload.email,
            hashed_password,
            payload.role,
            generate_reference_code(REFERRAL_CODE_LENGTH),
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create user: {}", e),
            )
        })?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(UserQueryParams),
    responses(
        (status = 200, description = "Users retrieved successfully", body = UserListResponse),
        (status = 403, description = "Forbidden - Mentor/Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_users(
    AuthClaims(auth_claims): AuthClaims,
    Query(params): Query<UserQueryParams>,
) -> Result<(StatusCode, Json<UserListResponse>), (StatusCode, String)> {
    if auth_claims.role != UserRole::MENTOR && auth_claims.role != UserRole::ADMIN {
        return Err((
            StatusCode::FORBIDDEN,
            "Only mentors and admins can list users".to_string(),
        ));
    }

    let page = if params.page == 0 { 1 } else { params.page };
    let page_size = if params.page_size == 0 || params.page_size > 100 {
        20
    } else {
        params.page_size
    };

    let user_repo = UserRepository::new();
    let (users, total) = user_repo
        .find_all_with_pagination(page, page_size, params.role, params.search)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get users: {}", e),
            )
        })?;

    Ok((
        StatusCode::OK,
        Json(UserListResponse {
            users: users.into_iter().map(Into::into).collect(),
            total,
            page,
            page_size,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    responses(
        (status = 200, description = "User retrieved successfully", body = UserDetailResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    AuthClaims(auth_claims): AuthClaims,
    Path(user_id): Path<String>,
) -> Result<(StatusCode, Json<UserDetailResponse>), (StatusCode, String)> {
    let user_id = uuid::Uuid::parse_str(&user_id)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid user_id: {}", e)))?;

    // Students can only read their own record
    if auth_claims.role == UserRole::STUDENT && auth_claims.user_id != user_id.to_string() {
        return Err((StatusCode::FORBIDDEN, "Access denied".to_string()));
    }

    let user_repo = UserRepository::new();
    let user = user_repo
        .find_by_id(user_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "User not found".to_string()))?;

    Ok((StatusCode::OK, Json(user.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/{user_id}",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = UserDetailResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_user(
    AuthClaims(auth_claims): AuthClaims,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<(StatusCode, Json<UserDetailResponse>), (StatusCode, String)> {
    if auth_claims.role != UserRole::ADMIN {
        return Err((
            StatusCode::FORBIDDEN,
            "Only admins can update users".to_string(),
        ));
    }

    let user_id = uuid::Uuid::parse_str(&user_id)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid user_id: {}", e)))?;

    let password = match payload.password {
        Some(password) => {
            if password.len() < 6 {
                return Err((
                    StatusCode::BAD_REQUEST,
                    "Password must be at least 6 characters".to_string(),
                ));
            }
            Some(bcrypt::hash(&password, bcrypt::DEFAULT_COST).map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to hash password: {}", e),
                )
            })?)
        }
        None => None,
    };

    let user_repo = UserRepository::new();
    let user = user_repo
        .update(
            user_id,
            UserUpdate {
                first_name: payload.first_name,
                last_name: payload.last_name,
                email: payload.email,
                password,
                role: payload.role,
            },
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update user: {}", e),
            )
        })?;

    Ok((StatusCode::OK, Json(user.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    responses(
        (status = 200, description = "User deleted successfully", body = DeleteUserResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    AuthClaims(auth_claims): AuthClaims,
    Path(user_id): Path<String>,
) -> Result<(StatusCode, Json<DeleteUserResponse>), (StatusCode, String)> {
    if auth_claims.role != UserRole::ADMIN {
        return Err((
            StatusCode::FORBIDDEN,
            "Only admins can delete users".to_string(),
        ));
    }

    let user_id = uuid::Uuid::parse_str(&user_id)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid user_id: {}", e)))?;

    let user_repo = UserRepository::new();
    user_repo.soft_delete(user_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete user: {}", e),
        )
    })?;

    Ok((
        StatusCode::OK,
        Json(DeleteUserResponse {
            success: true,
            message: "User deleted successfully".to_string(),
        }),
    ))
}
