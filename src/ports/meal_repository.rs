//! MealRepository port - persistence for the meal log.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::nutrition::MealEntry;

/// Port for the per-user, per-day meal log.
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Append a meal entry.
    async fn create(&self, entry: &MealEntry) -> Result<(), DomainError>;

    /// List a user's entries for one calendar date, newest first.
    async fn list_for_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Vec<MealEntry>, DomainError>;
}
