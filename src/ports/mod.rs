//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts
//! between the domain and the outside world. Adapters implement these
//! ports; handlers receive them as injected `Arc<dyn ...>` values so
//! no module-level clients exist anywhere.

mod food_repository;
mod meal_repository;
mod payment_provider;
mod user_repository;
mod webhook_event_repository;

pub use food_repository::FoodRepository;
pub use meal_repository::MealRepository;
pub use payment_provider::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    PortalSession,
};
pub use user_repository::{CasResult, UserRecordRepository};
pub use webhook_event_repository::{
    ProcessingOutcome, SaveResult, WebhookEventRecord, WebhookEventRepository,
};
