//! Nutrition HTTP module.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    FoodRequest, FoodResponse, LogMealRequest, MealEntryResponse, SummaryResponse,
};
pub use routes::routes;
