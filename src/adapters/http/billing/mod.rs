//! Billing HTTP module.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CheckoutRequest, CheckoutResponse, PortalRequest, PortalResponse, ReconcileResponse,
    WebhookAck,
};
pub use routes::{routes, webhook_routes};
