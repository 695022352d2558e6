//! Bearer-token principal extraction
//!
//! Token issuance and validation are the identity component's concern; the
//! API layer only turns `Authorization: Bearer <token>` into a resolved
//! [`Principal`] via the [`UserDirectory`] contract.

use super::handlers::AppError;
use crate::users::Principal;
use crate::AppState;
use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};

/// The authenticated principal of the current request.
pub struct AuthUser(pub Principal);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("expected a bearer token".to_string()))?;

        let principal = state
            .users
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid or expired token".to_string()))?;

        Ok(AuthUser(principal))
    }
}
