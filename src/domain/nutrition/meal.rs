//! Meal log entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{FoodId, MealEntryId, Timestamp, UserId, ValidationError};

use super::Macros;

/// One logged meal, bucketed by UTC calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    /// Unique entry id.
    pub id: MealEntryId,

    /// Owning user.
    pub user_id: UserId,

    /// What was eaten ("Grilled chicken salad").
    pub name: String,

    /// Consumed macros for this meal.
    pub macros: Macros,

    /// The saved food this meal came from, when logged from the
    /// food list rather than free-form.
    pub food_id: Option<FoodId>,

    /// Calendar date the entry counts toward.
    pub date: NaiveDate,

    /// Exact time the meal was logged.
    pub logged_at: Timestamp,
}

impl MealEntry {
    /// Logs a meal at `now`, bucketed under `now`'s UTC date.
    pub fn log(
        user_id: UserId,
        name: impl Into<String>,
        macros: Macros,
        food_id: Option<FoodId>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        Ok(Self {
            id: MealEntryId::new(),
            user_id,
            name,
            macros,
            food_id,
            date: now.date(),
            logged_at: now,
        })
    }
}
