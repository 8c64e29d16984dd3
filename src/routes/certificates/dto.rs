use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::certificate;

#[derive(Debug, Serialize, ToSchema)]
pub struct CertificateResponse {
    pub certificate_id: Uuid,
    pub application_id: Uuid,
    pub user_id: Uuid,
    pub unique_code: String,
    pub grade: String,
    pub issued_at: chrono::NaiveDateTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CertificateListResponse {
    pub certificates: Vec<CertificateResponse>,
}

/// Public verification payload - resolved purely from the verification code
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyCertificateResponse {
    pub valid: bool,
    pub unique_code: String,
    pub student_name: String,
    pub internship_title: String,
    pub grade: String,
    pub issued_at: chrono::NaiveDateTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteCertificateResponse {
    pub success: bool,
    pub message: String,
}

impl From<certificate::Model> for CertificateResponse {
    fn from(model: certificate::Model) -> Self {
        Self {
            certificate_id: model.certificate_id,
            application_id: model.application_id,
            user_id: model.user_id,
            unique_code: model.unique_code,
            grade: model.grade,
            issued_at: model.issued_at,
        }
    }
}
