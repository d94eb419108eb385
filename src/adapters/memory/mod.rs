//! In-memory adapters.
//!
//! Back the same ports as the Postgres adapters without a database.
//! Used by unit and integration tests, and usable for local runs.

mod nutrition;
mod user_repository;
mod webhook_event_repository;

pub use nutrition::{InMemoryFoodRepository, InMemoryMealRepository};
pub use user_repository::InMemoryUserRecordRepository;
pub use webhook_event_repository::InMemoryWebhookEventRepository;
