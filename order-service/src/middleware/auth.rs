use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use service_core::error::AppError;

use crate::error::OrderError;
use crate::AppState;

const TOKEN_NOT_VALID: &str = "Token is not valid";

/// The authenticated caller, resolved from the bearer token.
///
/// Rejects with 401 when the header is missing, the token does not verify,
/// or the account it names no longer exists.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| OrderError::Unauthorized("No token, authorization denied".into()))?;

        let claims = state.jwt.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Rejected bearer token");
            OrderError::Unauthorized(TOKEN_NOT_VALID.into())
        })?;

        let user = state
            .users
            .find_user(&claims.user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id = %claims.user_id, "Token names an unknown account");
                OrderError::Unauthorized(TOKEN_NOT_VALID.into())
            })?;

        tracing::Span::current().record("user_id", user.id.as_str());

        Ok(AuthUser { id: user.id })
    }
}
