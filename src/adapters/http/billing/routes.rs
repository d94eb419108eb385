//! Axum router configuration for billing endpoints.

use axum::routing::post;
use axum::Router;

use super::super::AppState;
use super::handlers::{create_checkout, create_portal, handle_stripe_webhook, reconcile};

/// Billing API routes.
///
/// - `POST /checkout` - start the subscribe flow
/// - `POST /portal` - open the billing portal
/// - `POST /reconcile` - server-side subscription re-check (auth)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(create_checkout))
        .route("/portal", post(create_portal))
        .route("/reconcile", post(reconcile))
}

/// Webhook routes, mounted separately because they carry no user
/// authentication - the signature is the credential.
///
/// - `POST /stripe` - signed event receiver
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/stripe", post(handle_stripe_webhook))
}
