use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::{ApplicationStatus, PaymentStatus};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateOrderRequest {
    pub application_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    pub order_id: String,
    /// Amount in minor currency units
    pub amount: i64,
    pub currency: String,
    /// Public gateway key id for the checkout widget
    pub key_id: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct VerifyPaymentRequest {
    pub application_id: Uuid,
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    pub status: ApplicationStatus,
    pub payment_status: PaymentStatus,
}
