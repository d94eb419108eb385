//! DailySummaryHandler - daily consumed-vs-targets read.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::nutrition::DailySummary;
use crate::ports::{MealRepository, UserRecordRepository};

/// Query for one day's progress.
#[derive(Debug, Clone)]
pub struct DailySummaryQuery {
    pub user_id: UserId,
    pub date: NaiveDate,
}

/// Handler computing the daily summary against the user's targets.
pub struct DailySummaryHandler {
    users: Arc<dyn UserRecordRepository>,
    meals: Arc<dyn MealRepository>,
}

impl DailySummaryHandler {
    pub fn new(users: Arc<dyn UserRecordRepository>, meals: Arc<dyn MealRepository>) -> Self {
        Self { users, meals }
    }

    pub async fn handle(&self, query: DailySummaryQuery) -> Result<DailySummary, DomainError> {
        let record = self
            .users
            .find_by_id(&query.user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "User record not found"))?;

        let entries = self.meals.list_for_date(&query.user_id, query.date).await?;

        Ok(DailySummary::from_entries(
            query.date,
            &entries,
            record.targets,
        ))
    }
}
