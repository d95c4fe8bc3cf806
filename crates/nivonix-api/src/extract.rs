use axum::{async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use std::sync::Arc;

use crate::{error::ApiError, state::AppState};

/// The authenticated owner of the request, extracted from the bearer token.
///
/// Signature and expiry are checked before any handler runs; a missing or
/// invalid token rejects the request without touching the thread store.
pub struct AuthUser(pub String);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthenticated)?;

        let user_id = state
            .auth
            .verify_bearer(token)
            .map_err(|_| ApiError::Unauthenticated)?;

        Ok(AuthUser(user_id))
    }
}
