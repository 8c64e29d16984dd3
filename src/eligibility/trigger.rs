//! Wiring between lesson completion and certificate issuance.
//!
//! The primary operation (marking a lesson complete, approving a
//! submission) must never fail because of this hook: every error is logged
//! and swallowed here.

use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::entities::{certificate, course_module};
use crate::rabbitmq_service::consumers::get_rabbitmq_connection;
use crate::rabbitmq_service::rabbitmq_service::RabbitMQService;
use crate::repositories::UserRepository;
use crate::static_service::DATABASE_CONNECTION;

use super::{EligibilityOutcome, evaluate_course_completion};

/// Runs the eligibility evaluator for the course owning `module_id` and
/// queues the certificate email on issuance. Returns the certificate when
/// one was issued by this call.
pub async fn evaluate_after_lesson_completion(
    user_id: Uuid,
    module_id: Uuid,
) -> Option<certificate::Model> {
    let Some(db) = DATABASE_CONNECTION.get() else {
        tracing::error!("Eligibility evaluation skipped: database connection not set");
        return None;
    };

    let module = match course_module::Entity::find_by_id(module_id).one(db).await {
        Ok(Some(module)) => module,
        Ok(None) => {
            tracing::warn!("Lesson completion for unknown module {}", module_id);
            return None;
        }
        Err(e) => {
            tracing::error!("Failed to resolve module {}: {}", module_id, e);
            return None;
        }
    };

    let outcome = match evaluate_course_completion(db, user_id, module.course_id).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(
                "Eligibility evaluation failed for user {} in course {}: {}",
                user_id,
                module.course_id,
                e
            );
            return None;
        }
    };

    match outcome {
        EligibilityOutcome::Issued(cert) => {
            send_certificate_email(user_id, &cert).await;
            Some(cert)
        }
        EligibilityOutcome::Incomplete {
            completed,
            required,
        } => {
            tracing::debug!(
                "Course {} gating progress for user {}: {}/{}",
                module.course_id,
                user_id,
                completed,
                required
            );
            None
        }
        other => {
            tracing::debug!(
                "Eligibility outcome for user {} in course {}: {:?}",
                user_id,
                module.course_id,
                other
            );
            None
        }
    }
}

async fn send_certificate_email(user_id: Uuid, cert: &certificate::Model) {
    let user_repo = UserRepository::new();
    let user = match user_repo.find_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!("Certificate {} issued for unknown user", cert.unique_code);
            return;
        }
        Err(e) => {
            tracing::error!("Failed to load user for certificate email: {}", e);
            return;
        }
    };

    let email_subject = "Your certificate is ready";
    let email_body = format!(
        "Hi {},\n\nCongratulations! You completed your internship coursework and your \
         certificate has been issued.\n\nVerification code: {}\n\nAnyone can verify it at \
         any time using this code.\n\nThe Internship Team",
        user.first_name, cert.unique_code
    );

    let rabbitmq_conn = get_rabbitmq_connection().await;
    if let Err(e) =
        RabbitMQService::publish_to_mail_queue(rabbitmq_conn, &user.email, email_subject, &email_body)
            .await
    {
        tracing::error!(
            "Failed to queue certificate email for {}: {}",
            user.email,
            e
        );
    }
}
