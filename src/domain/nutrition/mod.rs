//! Nutrition domain module.
//!
//! Foods, meal log entries, and the daily summary that measures
//! consumed macros against the user's targets.

mod food;
mod meal;
mod summary;

pub use food::{Food, Macros};
pub use meal::MealEntry;
pub use summary::DailySummary;
