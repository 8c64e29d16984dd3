use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[allow(non_camel_case_types)]
pub enum UserRole {
    STUDENT,
    MENTOR,
    ADMIN,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtManager {
    secret: String,
}

impl JwtManager {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn generate_token(
        &self,
        user_id: &str,
        email: &str,
        role: UserRole,
        ttl_seconds: i64,
    ) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            user_id: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: now,
            exp: now + ttl_seconds,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to encode JWT")
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims> {
        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .context("Failed to decode JWT")?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        let manager = JwtManager::new("test-secret");
        let token = manager
            .generate_token("user-1", "student@example.com", UserRole::STUDENT, 3600)
            .unwrap();

        let claims = manager.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, "user-1");
        assert_eq!(claims.email, "student@example.com");
        assert_eq!(claims.role, UserRole::STUDENT);
    }

    #[test]
    fn expired_token_is_rejected() {
        let manager = JwtManager::new("test-secret");
        // Validation has 60s of default leeway, so expire well in the past
        let token = manager
            .generate_token("user-1", "student@example.com", UserRole::STUDENT, -300)
            .unwrap();

        assert!(manager.verify_token(&token).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let manager = JwtManager::new("test-secret");
        let token = manager
            .generate_token("user-1", "admin@example.com", UserRole::ADMIN, 3600)
            .unwrap();

        let other = JwtManager::new("other-secret");
        assert!(other.verify_token(&token).is_err());
    }
}
