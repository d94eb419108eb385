//! Billing handlers: checkout, portal, webhook processing, and
//! subscription reconciliation.

mod create_checkout;
mod create_portal;
mod process_webhook;
mod reconcile_subscription;

pub use create_checkout::{CreateCheckoutCommand, CreateCheckoutHandler};
pub use create_portal::{CreatePortalCommand, CreatePortalHandler};
pub use process_webhook::{ProcessWebhookCommand, ProcessWebhookHandler};
pub use reconcile_subscription::{
    ReconcileOutcome, ReconcileSubscriptionCommand, ReconcileSubscriptionHandler,
};
