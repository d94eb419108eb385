//! Axum router configuration for nutrition endpoints.

use axum::routing::{delete, get, post};
use axum::Router;

use super::super::AppState;
use super::handlers::{add_food, daily_summary, delete_food, list_foods, list_meals, log_meal};

/// Nutrition API routes (all require authentication).
///
/// - `POST /api/foods` / `GET /api/foods` - food list
/// - `DELETE /api/foods/:id` - remove a food
/// - `POST /api/meals` / `GET /api/meals?date=...` - meal log
/// - `GET /api/summary?date=...` - daily progress
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/foods", post(add_food).get(list_foods))
        .route("/api/foods/:id", delete(delete_food))
        .route("/api/meals", post(log_meal).get(list_meals))
        .route("/api/summary", get(daily_summary))
}
