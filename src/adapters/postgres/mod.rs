//! PostgreSQL adapters.
//!
//! sqlx implementations of the repository ports. Schema lives under
//! `migrations/`.

mod food_repository;
mod meal_repository;
mod user_repository;
mod webhook_event_repository;

pub use food_repository::PostgresFoodRepository;
pub use meal_repository::PostgresMealRepository;
pub use user_repository::PostgresUserRecordRepository;
pub use webhook_event_repository::PostgresWebhookEventRepository;
