//! Authentication extractor
//!
//! Handlers that take an [`AuthUser`] only run for requests carrying a
//! valid session token. The token is read from the `x-auth-token` header,
//! falling back to `Authorization: Bearer <token>`.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::debug;
use uuid::Uuid;

/// Header carrying the raw session token
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Authenticated user extracted from the session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Pull the raw token out of the request headers
fn token_from_headers(headers: &HeaderMap) -> Result<&str, ApiError> {
    if let Some(value) = headers.get(AUTH_TOKEN_HEADER) {
        return value
            .to_str()
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Token is not valid".to_string()));
    }

    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("No token, authorization denied".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let token = token_from_headers(&parts.headers)?;

        let claims = app_state.jwt().validate_token(token).map_err(|e| {
            debug!(error = %e, "Rejected session token");
            ApiError::Unauthorized("Token is not valid".to_string())
        })?;

        let user_id = claims
            .user_id()
            .map_err(|_| ApiError::Unauthorized("Token is not valid".to_string()))?;

        Ok(AuthUser { user_id })
    }
}
