//! Nutrition handlers: food list maintenance, meal logging, and the
//! daily summary.

mod add_food;
mod daily_summary;
mod delete_food;
mod list_foods;
mod log_meal;

pub use add_food::{AddFoodCommand, AddFoodHandler};
pub use daily_summary::{DailySummaryHandler, DailySummaryQuery};
pub use delete_food::{DeleteFoodCommand, DeleteFoodHandler};
pub use list_foods::{ListFoodsHandler, ListFoodsQuery};
pub use log_meal::{LogMealCommand, LogMealHandler};
