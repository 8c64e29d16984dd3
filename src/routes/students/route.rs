use axum::{
    Json, Router,
    extract::{Multipart, Path},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use super::dto::{
    BulkEnrollError, BulkEnrollResponse, EnrollmentCsvRow, EnrollmentProgressResponse,
};
use crate::config::{REFERRAL_CODE_LENGTH, TEMP_PASSWORD_LENGTH};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::extractor::AuthClaims;
use crate::rabbitmq_service::consumers::get_rabbitmq_connection;
use crate::rabbitmq_service::rabbitmq_service::RabbitMQService;
use crate::redis_service::redis_service::EnrollmentTrackProgress;
use crate::repositories::{ApplicationRepository, InternshipRepository, UserRepository};
use crate::utils::jwt::UserRole;
use crate::utils::random::{generate_random_string, generate_reference_code};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/students/bulk", post(bulk_enroll))
        .route(
            "/api/v1/students/bulk/{file_name}/progress",
            get(get_bulk_progress),
        )
}

/// Bulk CSV enrollment. The file carries an `email,name` header; each row is
/// matched to an existing user by email or a new student account is created,
/// then enrolled into the internship and sent a credential email.
#[utoipa::path(
    post,
    path = "/api/v1/students/bulk",
    responses(
        (status = 200, description = "CSV processed", body = BulkEnrollResponse),
        (status = 400, description = "Missing file or internship_id"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn bulk_enroll(
    AuthClaims(auth_claims): AuthClaims,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<BulkEnrollResponse>), (StatusCode, String)> {
    if auth_claims.role != UserRole::ADMIN {
        return Err((
            StatusCode::FORBIDDEN,
            "Only admins can bulk enroll students".to_string(),
        ));
    }

    let mut internship_id: Option<Uuid> = None;
    let mut file_name = String::new();
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to read multipart field: {}", e),
        )
    })? {
        match field.name() {
            Some("internship_id") => {
                let value = field.text().await.map_err(|e| {
                    (
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read internship_id: {}", e),
                    )
                })?;
                let parsed = Uuid::parse_str(&value).map_err(|e| {
                    (
                        StatusCode::BAD_REQUEST,
                        format!("Invalid internship_id: {}", e),
                    )
                })?;
                internship_id = Some(parsed);
            }
            Some("file") => {
                file_name = field.file_name().unwrap_or("upload.csv").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    (
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read file: {}", e),
                    )
                })?;
                file_bytes = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    let internship_id = internship_id.ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            "internship_id field is required".to_string(),
        )
    })?;
    let file_bytes =
        file_bytes.ok_or_else(|| (StatusCode::BAD_REQUEST, "file field is required".to_string()))?;

    let internship_repo = InternshipRepository::new();
    internship_repo
        .find_by_id(internship_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get internship: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Internship not found".to_string()))?;

    let mut reader = csv::Reader::from_reader(file_bytes.as_slice());
    let rows: Vec<Result<EnrollmentCsvRow, csv::Error>> = reader.deserialize().collect();
    let total_records = rows.len();

    // Progress is tracked in Redis so the admin UI can poll while large
    // files are processed; tracker failures must not abort the upload
    if let Err(e) = EnrollmentTrackProgress::set_total(&file_name, total_records as u64).await {
        tracing::error!("Failed to initialize enrollment tracker: {}", e);
    }
    if let Err(e) = EnrollmentTrackProgress::set_current(&file_name, 0).await {
        tracing::error!("Failed to reset enrollment progress: {}", e);
    }
    if let Err(e) = EnrollmentTrackProgress::reset_success_failed(&file_name).await {
        tracing::error!("Failed to reset enrollment counters: {}", e);
    }

    let mut successful = 0;
    let mut errors = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        let row_number = index + 1;

        let (email, result) = match row {
            Ok(row) => (
                row.email.trim().to_lowercase(),
                enroll_row(&row, internship_id).await,
            ),
            Err(e) => (String::new(), Err(format!("Invalid CSV row: {}", e))),
        };

        match result {
            Ok(email) => {
                successful += 1;
                if let Err(e) = EnrollmentTrackProgress::increment_success(&file_name).await {
                    tracing::error!("Failed to increment success counter: {}", e);
                }
                tracing::debug!("Enrolled {} from row {}", email, row_number);
            }
            Err(error) => {
                if let Err(e) = EnrollmentTrackProgress::increment_failed(&file_name).await {
                    tracing::error!("Failed to increment failed counter: {}", e);
                }
                errors.push(BulkEnrollError {
                    row: row_number,
                    email,
                    error,
                });
            }
        }

        if let Err(e) = EnrollmentTrackProgress::set_current(&file_name, row_number as u64).await {
            tracing::error!("Failed to update enrollment progress: {}", e);
        }
    }

    let failed = errors.len();

    Ok((
        StatusCode::OK,
        Json(BulkEnrollResponse {
            file_name,
            total_records,
            successful,
            failed,
            errors,
        }),
    ))
}

/// Creates-or-matches the user, enrolls them, and queues the email. Returns
/// the email address on success.
async fn enroll_row(row: &EnrollmentCsvRow, internship_id: Uuid) -> Result<String, String> {
    row.validate()?;

    let user_repo = UserRepository::new();
    let email = row.email.trim().to_lowercase();

    let (user, temp_password) = match user_repo
        .find_by_email(&email)
        .await
        .map_err(|e| format!("Failed to look up user: {}", e))?
    {
        Some(user) => (user, None),
        None => {
            let (first_name, last_name) = row.split_name();
            let temp_password = generate_random_string(TEMP_PASSWORD_LENGTH);
            let hashed = bcrypt::hash(&temp_password, bcrypt::DEFAULT_COST)
                .map_err(|e| format!("Failed to hash password: {}", e))?;

            let user = user_repo
                .create(
                    Uuid::new_v4(),
                    first_name,
                    last_name,
                    email.clone(),
                    hashed,
                    RoleEnum::Student,
                    generate_reference_code(REFERRAL_CODE_LENGTH),
                )
                .await
                .map_err(|e| format!("Failed to create user: {}", e))?;

            (user, Some(temp_password))
        }
    };

    let application_repo = ApplicationRepository::new();
    let already_enrolled = application_repo
        .find_by_user_and_internship(user.user_id, internship_id)
        .await
        .map_err(|e| format!("Failed to check application: {}", e))?
        .is_some();

    if !already_enrolled {
        application_repo
            .create_enrolled(user.user_id, internship_id)
            .await
            .map_err(|e| format!("Failed to enroll: {}", e))?;
    }

    // Credential email for fresh accounts, enrollment notice otherwise
    let (subject, body) = match &temp_password {
        Some(password) => (
            "Your internship account",
            format!(
                "Hi {},\n\nAn account has been created for you and you have been enrolled.\n\n\
                 Email: {}\nTemporary password: {}\n\nPlease change the password after your \
                 first login.\n\nThe Internship Team",
                user.first_name, user.email, password
            ),
        ),
        None => (
            "You have been enrolled",
            format!(
                "Hi {},\n\nYou have been enrolled into a new internship program. It is now \
                 available on your dashboard.\n\nThe Internship Team",
                user.first_name
            ),
        ),
    };

    let rabbitmq_conn = get_rabbitmq_connection().await;
    if let Err(e) =
        RabbitMQService::publish_to_mail_queue(rabbitmq_conn, &user.email, subject, &body).await
    {
        tracing::error!("Failed to queue enrollment email for {}: {}", user.email, e);
    }

    Ok(email)
}

#[utoipa::path(
    get,
    path = "/api/v1/students/bulk/{file_name}/progress",
    responses(
        (status = 200, description = "Enrollment progress", body = EnrollmentProgressResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn get_bulk_progress(
    AuthClaims(auth_claims): AuthClaims,
    Path(file_name): Path<String>,
) -> Result<(StatusCode, Json<EnrollmentProgressResponse>), (StatusCode, String)> {
    if auth_claims.role != UserRole::ADMIN {
        return Err((
            StatusCode::FORBIDDEN,
            "Only admins can view enrollment progress".to_string(),
        ));
    }

    let progress = EnrollmentTrackProgress::get_progress(&file_name)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get enrollment progress: {}", e),
            )
        })?;

    Ok((
        StatusCode::OK,
        Json(EnrollmentProgressResponse {
            total: progress.total,
            current: progress.current,
            percent: progress.percent,
            success: progress.success,
            failed: progress.failed,
        }),
    ))
}
