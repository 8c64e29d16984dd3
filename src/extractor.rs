use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use http::StatusCode;

use crate::config::APP_CONFIG;
use crate::redis_service::redis_service::JwtBlacklist;
use crate::utils::jwt::{JwtManager, TokenClaims};

/// Bearer-token extractor used by every authenticated handler.
pub struct AuthClaims(pub TokenClaims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                (
                    StatusCode::UNAUTHORIZED,
                    "Missing or invalid authorization header".to_string(),
                )
            })?;

        let jwt_manager = JwtManager::new(APP_CONFIG.jwt_secret.clone());
        let claims = jwt_manager.verify_token(bearer.token()).map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            )
        })?;

        match JwtBlacklist::check_jwt_in_blacklist(&claims.user_id, bearer.token()).await {
            Ok(true) => {
                return Err((
                    StatusCode::UNAUTHORIZED,
                    "Token has been revoked".to_string(),
                ));
            }
            Ok(false) => {}
            Err(e) => {
                // Redis being unavailable must not lock every user out
                tracing::warn!("Failed to check JWT blacklist: {}", e);
            }
        }

        Ok(AuthClaims(claims))
    }
}
