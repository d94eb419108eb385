//! HTTP handlers for billing endpoints.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::handlers::billing::{
    CreateCheckoutCommand, CreatePortalCommand, ProcessWebhookCommand,
    ReconcileSubscriptionCommand,
};
use crate::domain::billing::WebhookError;
use crate::domain::foundation::UserId;

use super::super::{ApiError, AppState, AuthenticatedUser, ErrorResponse};
use super::dto::{
    CheckoutRequest, CheckoutResponse, PortalRequest, PortalResponse, ReconcileResponse,
    WebhookAck,
};

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::new(raw).map_err(|e| ApiError::from(crate::domain::foundation::DomainError::from(e)))
}

/// POST /api/billing/checkout - create a checkout session
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_checkout_handler();
    let session = handler
        .handle(CreateCheckoutCommand {
            user_id: parse_user_id(&request.user_id)?,
            email: request.email,
        })
        .await?;

    Ok(Json(CheckoutResponse { url: session.url }))
}

/// POST /api/billing/portal - create a billing portal session
pub async fn create_portal(
    State(state): State<AppState>,
    Json(request): Json<PortalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_portal_handler();
    let session = handler
        .handle(CreatePortalCommand {
            user_id: parse_user_id(&request.user_id)?,
        })
        .await?;

    Ok(Json(PortalResponse { url: session.url }))
}

/// POST /api/billing/reconcile - server-side subscription re-check
///
/// Route gating blocks until the first call resolves, so access is
/// never granted on an unverified local status.
pub async fn reconcile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.reconcile_handler();
    let outcome = handler
        .handle(ReconcileSubscriptionCommand {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(ReconcileResponse {
        status: outcome.status,
        checked: outcome.checked,
        corrected: outcome.corrected,
    }))
}

/// POST /api/webhooks/stripe - signed webhook receiver
///
/// Responds 200 `{"received":true}` for processed, ignored, and
/// duplicate events; 4xx for verification/shape failures (no retry);
/// 5xx for transient failures so Stripe redelivers.
pub async fn handle_stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> axum::response::Response {
    let Some(signature) = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
    else {
        tracing::warn!("Webhook rejected: missing Stripe-Signature header");
        let body = ErrorResponse::new("MISSING_SIGNATURE", "Missing Stripe-Signature header");
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    };

    let handler = state.process_webhook_handler();
    let result = handler
        .handle(ProcessWebhookCommand {
            payload: body.to_vec(),
            signature,
        })
        .await;

    match result {
        Ok(_) => (StatusCode::OK, Json(WebhookAck { received: true })).into_response(),
        Err(e) => webhook_error_response(e),
    }
}

fn webhook_error_response(err: WebhookError) -> axum::response::Response {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = %err, "Webhook processing failed, provider will retry");
    } else {
        tracing::warn!(error = %err, "Webhook rejected");
    }

    let body = ErrorResponse::new("WEBHOOK_ERROR", err.to_string());
    (status, Json(body)).into_response()
}
