//! HTTP handlers for account endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::account::{
    GetAccountQuery, RegisterUserCommand, UpdateTargetsCommand,
};
use crate::domain::account::MacroTargets;
use crate::domain::foundation::{DomainError, UserId};

use super::super::{ApiError, AppState, AuthenticatedUser};
use super::dto::{AccountResponse, RegisterRequest, TargetsRequest};

/// POST /api/account/register - create the record at sign-up
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = UserId::new(request.user_id).map_err(DomainError::from)?;

    let handler = state.register_user_handler();
    let record = handler
        .handle(RegisterUserCommand {
            user_id,
            email: request.email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(record))))
}

/// GET /api/account - current user's record
pub async fn get_account(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.get_account_handler();
    let record = handler
        .handle(GetAccountQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(AccountResponse::from(record)))
}

/// PUT /api/account/targets - replace daily macro targets
pub async fn update_targets(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<TargetsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let targets = MacroTargets::new(
        request.calories,
        request.protein,
        request.carbs,
        request.fat,
    )
    .map_err(DomainError::from)?;

    let handler = state.update_targets_handler();
    let record = handler
        .handle(UpdateTargetsCommand {
            user_id: user.user_id,
            targets,
        })
        .await?;

    Ok(Json(AccountResponse::from(record)))
}
