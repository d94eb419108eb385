//! HTTP adapter - axum routers, handlers, and DTOs.
//!
//! Route modules mirror the application handler modules. All of them
//! share one `AppState` of Arc-wrapped ports.

pub mod account;
pub mod billing;
pub mod nutrition;

mod state;

pub use state::{ApiError, AppState, AuthenticatedUser, BillingUrls, ErrorBody, ErrorResponse};

use axum::routing::get;
use axum::Router;

/// Builds the complete API router.
///
/// - `/api/account/*` - registration, record reads, targets
/// - `/api/billing/*` - checkout, portal, reconcile
/// - `/api/webhooks/stripe` - signed webhook receiver
/// - `/api/foods`, `/api/meals`, `/api/summary` - nutrition log
/// - `/api/health` - liveness probe
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/account", account::routes())
        .nest("/api/billing", billing::routes())
        .nest("/api/webhooks", billing::webhook_routes())
        .merge(nutrition::routes())
        .route("/api/health", get(health_check))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "ok"
}
