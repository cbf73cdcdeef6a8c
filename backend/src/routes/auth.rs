//! Authentication routes
//!
//! - `GET  /api/auth`       current user profile (requires a session token)
//! - `POST /api/auth`       register, returns a session token
//! - `POST /api/auth/login` exchange credentials for a session token

use super::json_body;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use devconnector_shared::{LoginRequest, RegisterRequest, UserProfile};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_current_user).post(register))
        .route("/login", post(login))
}

/// Get the authenticated user's profile
///
/// GET /api/auth
async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<UserProfile>> {
    let profile = state.users().get_profile(auth_user.user_id).await?;
    Ok(Json(profile))
}

/// Register a new user
///
/// POST /api/auth
///
/// The body is the bare token as a JSON string.
pub(super) async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<String>> {
    let req = json_body(payload)?;
    let token = state.users().register(req).await?;
    Ok(Json(token))
}

/// Login with email and password
///
/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<String>> {
    let req = json_body(payload)?;
    let token = state.users().login(req).await?;
    Ok(Json(token))
}
