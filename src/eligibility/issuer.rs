use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::config::{
    CERTIFICATE_CODE_LENGTH, CERTIFICATE_CODE_MAX_ATTEMPTS, CERTIFICATE_CODE_PREFIX,
};
use crate::entities::certificate;
use crate::utils::random::generate_reference_code;

const UNIQUE_CODE_INDEX: &str = "idx_certificate_unique_code";

#[derive(Debug)]
pub enum IssueResult {
    Issued(certificate::Model),
    /// Another issuance for this application already landed; the unique
    /// index on application_id is what decided, not a prior read.
    AlreadyIssued,
}

pub fn generate_certificate_code() -> String {
    format!(
        "{}-{}",
        CERTIFICATE_CODE_PREFIX,
        generate_reference_code(CERTIFICATE_CODE_LENGTH)
    )
}

/// Persists a certificate for the application with a fresh verification
/// code.
///
/// Issuance is a single `INSERT ... ON CONFLICT (application_id) DO NOTHING`
/// so two concurrent "last lesson approved" events cannot both insert. A
/// collision on the verification-code index retries with a new code up to a
/// bounded attempt count.
pub async fn issue_certificate(
    db: &DatabaseConnection,
    application_id: Uuid,
    user_id: Uuid,
) -> Result<IssueResult> {
    for attempt in 1..=CERTIFICATE_CODE_MAX_ATTEMPTS {
        let unique_code = generate_certificate_code();
        let now = chrono::Utc::now().naive_utc();
        let model = certificate::ActiveModel {
            certificate_id: Set(Uuid::new_v4()),
            application_id: Set(application_id),
            user_id: Set(user_id),
            unique_code: Set(unique_code),
            grade: Set("Pass".to_string()),
            issued_at: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = certificate::Entity::insert(model)
            .on_conflict(
                OnConflict::column(certificate::Column::ApplicationId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match inserted {
            Ok(0) => return Ok(IssueResult::AlreadyIssued),
            Ok(_) => {
                let issued = certificate::Entity::find()
                    .filter(certificate::Column::ApplicationId.eq(application_id))
                    .one(db)
                    .await?
                    .context("Certificate inserted but not found")?;
                return Ok(IssueResult::Issued(issued));
            }
            Err(err) if is_unique_violation(&err, UNIQUE_CODE_INDEX) => {
                tracing::warn!(
                    "Certificate code collision for application {} (attempt {}), retrying",
                    application_id,
                    attempt
                );
                continue;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(anyhow::anyhow!(
        "Exhausted {} certificate code attempts for application {}",
        CERTIFICATE_CODE_MAX_ATTEMPTS,
        application_id
    ))
}

fn is_unique_violation(err: &DbErr, constraint: &str) -> bool {
    let message = err.to_string();
    message.contains("duplicate key") && message.contains(constraint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;
    use std::collections::HashSet;

    #[test]
    fn certificate_code_matches_expected_format() {
        for _ in 0..100 {
            let code = generate_certificate_code();
            let (prefix, suffix) = code.split_once('-').expect("code has a dash");
            assert_eq!(prefix, CERTIFICATE_CODE_PREFIX);
            assert_eq!(suffix.len(), CERTIFICATE_CODE_LENGTH);
            assert!(
                suffix
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            );
        }
    }

    #[test]
    fn certificate_codes_do_not_collide_over_many_draws() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(generate_certificate_code()));
        }
    }

    #[test]
    fn unique_violation_is_recognized_by_constraint_name() {
        let err = DbErr::Query(RuntimeErr::Internal(
            "error returned from database: duplicate key value violates unique constraint \"idx_certificate_unique_code\"".to_string(),
        ));
        assert!(is_unique_violation(&err, UNIQUE_CODE_INDEX));
        assert!(!is_unique_violation(&err, "idx_certificate_application_id"));

        let other = DbErr::Query(RuntimeErr::Internal("connection reset".to_string()));
        assert!(!is_unique_violation(&other, UNIQUE_CODE_INDEX));
    }
}
