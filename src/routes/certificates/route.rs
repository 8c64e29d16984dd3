use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    response::Html,
    routing::{delete, get},
};
use std::sync::Arc;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};

use super::dto::{
    CertificateListResponse, CertificateResponse, DeleteCertificateResponse,
    VerifyCertificateResponse,
};
use crate::entities::{application, certificate, internship, user};
use crate::extractor::AuthClaims;
use crate::repositories::{
    ApplicationRepository, CertificateRepository, InternshipRepository, UserRepository,
};
use crate::utils::jwt::UserRole;

pub fn create_route() -> Router {
    // Verification codes are the only credential on the public route, so it
    // gets a per-IP rate limit
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(10)
            .finish()
            .expect("Valid governor configuration"),
    );

    let public_verify = Router::new()
        .route(
            "/api/v1/certificates/verify/{code}",
            get(verify_certificate),
        )
        .layer(GovernorLayer {
            config: governor_conf,
        });

    Router::new()
        .route("/api/v1/certificates/mine", get(get_my_certificates))
        .route(
            "/api/v1/certificates/{certificate_id}/download",
            get(download_certificate),
        )
        .route(
            "/api/v1/certificates/{certificate_id}",
            delete(delete_certificate),
        )
        .merge(public_verify)
}

async fn resolve_certificate_context(
    cert: &certificate::Model,
) -> Result<(user::Model, application::Model, internship::Model), (StatusCode, String)> {
    let user_repo = UserRepository::new();
    let user = user_repo
        .find_by_id(cert.user_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get user: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Certificate holder not found".to_string()))?;

    let application_repo = ApplicationRepository::new();
    let application = application_repo
        .find_by_id(cert.application_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get application: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Application not found".to_string()))?;

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

    Ok((user, application, internship))
}

/// Public certificate verification - no auth, the code is the credential
#[utoipa::path(
    get,
    path = "/api/v1/certificates/verify/{code}",
    responses(
        (status = 200, description = "Certificate is valid", body = VerifyCertificateResponse),
        (status = 404, description = "Certificate not found"),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Certificates"
)]
pub async fn verify_certificate(
    Path(code): Path<String>,
) -> Result<(StatusCode, Json<VerifyCertificateResponse>), (StatusCode, String)> {
    let certificate_repo = CertificateRepository::new();
    let cert = certificate_repo
        .find_by_code(&code)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to look up certificate: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Certificate not found".to_string()))?;

    let (user, _application, internship) = resolve_certificate_context(&cert).await?;

    Ok((
        StatusCode::OK,
        Json(VerifyCertificateResponse {
            valid: true,
            unique_code: cert.unique_code,
            student_name: format!("{} {}", user.first_name, user.last_name),
            internship_title: internship.title,
            grade: cert.grade,
            issued_at: cert.issued_at,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/certificates/mine",
    responses(
        (status = 200, description = "Certificates retrieved", body = CertificateListResponse),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Certificates"
)]
pub async fn get_my_certificates(
    AuthClaims(auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<CertificateListResponse>), (StatusCode, String)> {
    let user_id = uuid::Uuid::parse_str(&auth_claims.user_id).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Invalid user_id: {}", e),
        )
    })?;

    let certificate_repo = CertificateRepository::new();
    let certificates = certificate_repo.find_by_user(user_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to get certificates: {}", e),
        )
    })?;

    Ok((
        StatusCode::OK,
        Json(CertificateListResponse {
            certificates: certificates.into_iter().map(Into::into).collect(),
        }),
    ))
}

/// Server-rendered printable certificate document
#[utoipa::path(
    get,
    path = "/api/v1/certificates/{certificate_id}/download",
    responses(
        (status = 200, description = "Printable certificate HTML", body = String, content_type = "text/html"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Certificate not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Certificates"
)]
pub async fn download_certificate(
    AuthClaims(auth_claims): AuthClaims,
    Path(certificate_id): Path<String>,
) -> Result<Html<String>, (StatusCode, String)> {
    let certificate_id = uuid::Uuid::parse_str(&certificate_id).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid certificate_id: {}", e),
        )
    })?;

    let certificate_repo = CertificateRepository::new();
    let cert = certificate_repo
        .find_by_id(certificate_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get certificate: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Certificate not found".to_string()))?;

    if auth_claims.role != UserRole::ADMIN && cert.user_id.to_string() != auth_claims.user_id {
        return Err((StatusCode::FORBIDDEN, "Access denied".to_string()));
    }

    let (user, _application, internship) = resolve_certificate_context(&cert).await?;

    Ok(Html(render_certificate_html(&cert, &user, &internship)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/certificates/{certificate_id}",
    responses(
        (status = 200, description = "Certificate deleted", body = DeleteCertificateResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Certificates"
)]
pub async fn delete_certificate(
    AuthClaims(auth_claims): AuthClaims,
    Path(certificate_id): Path<String>,
) -> Result<(StatusCode, Json<DeleteCertificateResponse>), (StatusCode, String)> {
    if auth_claims.role != UserRole::ADMIN {
        return Err((
            StatusCode::FORBIDDEN,
            "Only admins can delete certificates".to_string(),
        ));
    }

    let certificate_id = uuid::Uuid::parse_str(&certificate_id).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid certificate_id: {}", e),
        )
    })?;

    let certificate_repo = CertificateRepository::new();
    certificate_repo.delete(certificate_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete certificate: {}", e),
        )
    })?;

    Ok((
        StatusCode::OK,
        Json(DeleteCertificateResponse {
            success: true,
            message: "Certificate deleted successfully".to_string(),
        }),
    ))
}

fn render_certificate_html(
    cert: &certificate::Model,
    user: &user::Model,
    internship: &internship::Model,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Certificate {code}</title>
  <style>
    body {{ font-family: Georgia, serif; text-align: center; margin: 0; padding: 60px; }}
    .certificate {{ border: 12px double #2c3e50; padding: 60px; max-width: 800px; margin: 0 auto; }}
    h1 {{ font-size: 40px; letter-spacing: 4px; margin-bottom: 0; }}
    .student {{ font-size: 32px; margin: 30px 0 10px; }}
    .program {{ font-size: 22px; color: #555; }}
    .code {{ margin-top: 40px; font-family: monospace; font-size: 14px; color: #888; }}
    @media print {{ body {{ padding: 0; }} }}
  </style>
</head>
<body>
  <div class="certificate">
    <h1>CERTIFICATE</h1>
    <p>of completion</p>
    <p class="student">{student}</p>
    <p class="program">has successfully completed the<br><strong>{program}</strong></p>
    <p>Grade: {grade}</p>
    <p>Issued on {issued}</p>
    <p class="code">Verification code: {code}</p>
  </div>
</body>
</html>"#,
        code = cert.unique_code,
        student = format!("{} {}", user.first_name, user.last_name),
        program = internship.title,
        grade = cert.grade,
        issued = cert.issued_at.format("%B %e, %Y"),
    )
}
