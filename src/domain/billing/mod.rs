//! Billing domain module.
//!
//! The subscription lifecycle: Stripe webhook events, signature
//! verification, idempotent event processing, and the reconciliation
//! policy that re-derives local status from the provider.
//!
//! # Module Structure
//!
//! - `stripe_event` - Webhook event envelope and payload objects
//! - `webhook_verifier` - Signature header parsing and HMAC verification
//! - `webhook_processor` - Exactly-once event dispatch
//! - `webhook_errors` - Error taxonomy with HTTP/retry semantics
//! - `reconciler` - Cooldown gate and status resolution policy

mod reconciler;
mod stripe_event;
mod webhook_errors;
mod webhook_processor;
mod webhook_verifier;

pub use reconciler::{resolve_status, CooldownGate, RECONCILE_COOLDOWN_SECS};
pub use stripe_event::{
    CheckoutSessionObject, StripeEvent, StripeEventData, StripeEventType, SubscriptionObject,
};
pub use webhook_errors::WebhookError;
pub use webhook_processor::{
    IdempotentWebhookProcessor, WebhookDispatcher, WebhookEventHandler, WebhookResult,
};
pub use webhook_verifier::{SignatureHeader, WebhookVerifier};

#[cfg(test)]
pub use stripe_event::StripeEventBuilder;
#[cfg(test)]
pub use webhook_verifier::compute_test_signature;
