use axum::{Json, Router, http::StatusCode, routing::post};

use super::dto::{
    CreateOrderRequest, CreateOrderResponse, VerifyPaymentRequest, VerifyPaymentResponse,
};
use crate::config::APP_CONFIG;
use crate::entities::sea_orm_active_enums::ApplicationStatus;
use crate::extractor::AuthClaims;
use crate::payment_service::PaymentService;
use crate::rabbitmq_service::consumers::get_rabbitmq_connection;
use crate::rabbitmq_service::rabbitmq_service::RabbitMQService;
use crate::repositories::{ApplicationRepository, InternshipRepository, UserRepository};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/payments/order", post(create_order))
        .route("/api/v1/payments/verify", post(verify_payment))
}

#[utoipa::path(
    post,
    path = "/api/v1/payments/order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Payment order created", body = CreateOrderResponse),
        (status = 400, description = "Application is not awaiting payment"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Application not found"),
        (status = 502, description = "Payment gateway unavailable"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn create_order(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), (StatusCode, String)> {
    let application_repo = ApplicationRepository::new();
    let application = application_repo
        .find_by_id(payload.application_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get application: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Application not found".to_string()))?;

    if application.user_id.to_string() != auth_claims.user_id {
        return Err((StatusCode::FORBIDDEN, "Access denied".to_string()));
    }

    if application.status != ApplicationStatus::InterviewPassed {
        return Err((
            StatusCode::BAD_REQUEST,
            "Application is not awaiting payment".to_string(),
        ));
    }

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

    let payment_service = PaymentService::new();
    let order = payment_service
        .create_order(internship.price, &application.application_id.to_string())
        .await
        .map_err(|e| {
            (
                StatusCode::BAD_GATEWAY,
                format!("Failed to create payment order: {}", e),
            )
        })?;

    application_repo
        .set_payment_order(application.application_id, order.id.clone())
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to store payment order: {}", e),
            )
        })?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            order_id: order.id,
            amount: order.amount,
            currency: order.currency,
            key_id: APP_CONFIG.payment_key_id.clone(),
        }),
    ))
}

/// Verifies the gateway checkout signature, flips the payment status and
/// enrolls the application, then queues the enrollment email.
#[utoipa::path(
    post,
    path = "/api/v1/payments/verify",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified and application enrolled", body = VerifyPaymentResponse),
        (status = 400, description = "Signature verification failed"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Application not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn verify_payment(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<VerifyPaymentRequest>,
) -> Result<(StatusCode, Json<VerifyPaymentResponse>), (StatusCode, String)> {
    let application_repo = ApplicationRepository::new();
    let application = application_repo
        .find_by_id(payload.application_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get application: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Application not found".to_string()))?;

    if application.user_id.to_string() != auth_claims.user_id {
        return Err((StatusCode::FORBIDDEN, "Access denied".to_string()));
    }

    if application.payment_order_id.as_deref() != Some(payload.order_id.as_str()) {
        return Err((
            StatusCode::BAD_REQUEST,
            "Order does not belong to this application".to_string(),
        ));
    }

    let payment_service = PaymentService::new();
    let signature_valid = payment_service.verify_checkout_signature(
        &payload.order_id,
        &payload.payment_id,
        &payload.signature,
    );

    if !signature_valid {
        let application = application_repo
            .mark_payment_failed(payload.application_id)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to record failed payment: {}", e),
                )
            })?;

        return Ok((
            StatusCode::OK,
            Json(VerifyPaymentResponse {
                success: false,
                message: "Signature verification failed".to_string(),
                status: application.status,
                payment_status: application.payment_status,
            }),
        ));
    }

    let application = application_repo
        .mark_paid_and_enrolled(payload.application_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to enroll application: {}", e),
            )
        })?;

    // Enrollment email is fire-and-forget; a dispatch failure never rolls
    // back the payment
    let user_repo = UserRepository::new();
    match user_repo.find_by_id(application.user_id).await {
        Ok(Some(user)) => {
            let email_subject = "Enrollment confirmed";
            let email_body = format!(
                "Hi {},\n\nYour payment was received and your enrollment is confirmed. \
                 You can now access your courses from the dashboard.\n\nThe Internship Team",
                user.first_name
            );

            let rabbitmq_conn = get_rabbitmq_connection().await;
            if let Err(e) = RabbitMQService::publish_to_mail_queue(
                rabbitmq_conn,
                &user.email,
                email_subject,
                &email_body,
            )
            .await
            {
                tracing::error!("Failed to queue enrollment email: {}", e);
            }
        }
        Ok(None) => {
            tracing::warn!(
                "Enrolled application {} has no matching user",
                application.application_id
            );
        }
        Err(e) => {
            tracing::error!("Failed to load user for enrollment email: {}", e);
        }
    }

    Ok((
        StatusCode::OK,
        Json(VerifyPaymentResponse {
            success: true,
            message: "Payment verified and enrollment confirmed".to_string(),
            status: application.status,
            payment_status: application.payment_status,
        }),
    ))
}
