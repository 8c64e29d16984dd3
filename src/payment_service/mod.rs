//! Payment gateway client: order creation and checkout signature
//! verification. The gateway signs `"{order_id}|{payment_id}"` with
//! HMAC-SHA256 over the key secret and sends the hex digest back through the
//! client; verification recomputes and compares.

use anyhow::{Context, Result, bail};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::json;
use sha2::Sha256;

use crate::config::APP_CONFIG;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

pub struct PaymentService {
    client: reqwest::Client,
}

impl PaymentService {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Creates a gateway order for the given amount in minor currency
    /// units. The receipt ties the order back to our application id.
    pub async fn create_order(&self, amount: i64, receipt: &str) -> Result<GatewayOrder> {
        let body = json!({
            "amount": amount,
            "currency": APP_CONFIG.payment_currency,
            "receipt": receipt,
        });

        let response = self
            .client
            .post(format!("{}/v1/orders", APP_CONFIG.payment_api_base))
            .basic_auth(&APP_CONFIG.payment_key_id, Some(&APP_CONFIG.payment_key_secret))
            .json(&body)
            .send()
            .await
            .context("Payment gateway order request failed")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("Payment gateway returned {}: {}", status, text);
        }

        response
            .json::<GatewayOrder>()
            .await
            .context("Failed to decode payment gateway order")
    }

    pub fn verify_checkout_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> bool {
        verify_signature(
            &APP_CONFIG.payment_key_secret,
            order_id,
            payment_id,
            signature,
        )
    }
}

impl Default for PaymentService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn expected_signature(secret: &str, payload: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let payload = format!("{}|{}", order_id, payment_id);
    let expected = expected_signature(secret, &payload);
    // Hex digests, compared case-insensitively
    expected.eq_ignore_ascii_case(signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hmac_sha256_matches_rfc4231_test_vector() {
        // RFC 4231, test case 2
        let digest = expected_signature("Jefe", "what do ya want for nothing?");
        assert_eq!(
            digest,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn valid_signature_round_trips() {
        let secret = "key_secret_test";
        let signature = expected_signature(secret, "order_abc|pay_def");
        assert!(verify_signature(secret, "order_abc", "pay_def", &signature));
        assert!(verify_signature(
            secret,
            "order_abc",
            "pay_def",
            &signature.to_uppercase()
        ));
    }

    #[test]
    fn tampered_payment_id_fails_verification() {
        let secret = "key_secret_test";
        let signature = expected_signature(secret, "order_abc|pay_def");
        assert!(!verify_signature(secret, "order_abc", "pay_xyz", &signature));
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let signature = expected_signature("key_secret_test", "order_abc|pay_def");
        assert!(!verify_signature(
            "another_secret",
            "order_abc",
            "pay_def",
            &signature
        ));
    }
}
