//! Axum router configuration for account endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::super::AppState;
use super::handlers::{get_account, register, update_targets};

/// Account API routes.
///
/// - `POST /register` - create the record at sign-up
/// - `GET /` - current user's record (auth)
/// - `PUT /targets` - replace daily macro targets (auth)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/", get(get_account))
        .route("/targets", put(update_targets))
}
