//! User routes
//!
//! `POST /api/users` registers a user. It runs the same workflow as
//! `POST /api/auth` and answers with the same session token.

use super::auth::register;
use crate::state::AppState;
use axum::{routing::post, Router};

/// Create user routes
pub fn users_routes() -> Router<AppState> {
    Router::new().route("/", post(register))
}
