//! HTTP handlers for nutrition endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::application::handlers::nutrition::{
    AddFoodCommand, DailySummaryQuery, DeleteFoodCommand, ListFoodsQuery, LogMealCommand,
};
use crate::domain::foundation::{DomainError, FoodId, Timestamp};
use crate::domain::nutrition::Macros;

use super::super::{ApiError, AppState, AuthenticatedUser};
use super::dto::{FoodRequest, FoodResponse, LogMealRequest, MealEntryResponse, SummaryResponse};

/// Optional `?date=YYYY-MM-DD`; defaults to today (UTC).
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    #[serde(default)]
    date: Option<String>,
}

impl DateQuery {
    fn resolve(&self) -> Result<NaiveDate, ApiError> {
        match &self.date {
            None => Ok(Timestamp::now().date()),
            Some(raw) => raw.parse().map_err(|_| {
                ApiError::from(DomainError::validation(
                    "date",
                    "Date must be formatted YYYY-MM-DD",
                ))
            }),
        }
    }
}

fn parse_food_id(raw: &str) -> Result<FoodId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::from(DomainError::validation("food_id", "Invalid food id")))
}

/// POST /api/foods - save a food definition
pub async fn add_food(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<FoodRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let macros = Macros::new(request.calories, request.protein, request.carbs, request.fat)
        .map_err(DomainError::from)?;

    let handler = state.add_food_handler();
    let food = handler
        .handle(AddFoodCommand {
            user_id: user.user_id,
            name: request.name,
            serving: request.serving,
            macros,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(FoodResponse::from(food))))
}

/// GET /api/foods - list the user's foods
pub async fn list_foods(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.list_foods_handler();
    let foods = handler
        .handle(ListFoodsQuery {
            user_id: user.user_id,
        })
        .await?;

    let response: Vec<FoodResponse> = foods.into_iter().map(FoodResponse::from).collect();
    Ok(Json(response))
}

/// DELETE /api/foods/:id - remove a food
pub async fn delete_food(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.delete_food_handler();
    handler
        .handle(DeleteFoodCommand {
            user_id: user.user_id,
            food_id: parse_food_id(&id)?,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/meals - log a meal for today
pub async fn log_meal(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<LogMealRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let food_id = request
        .food_id
        .as_deref()
        .map(parse_food_id)
        .transpose()?;

    let handler = state.log_meal_handler();
    let entry = handler
        .handle(LogMealCommand {
            user_id: user.user_id,
            name: request.name.clone(),
            macros: request.macros(),
            food_id,
            servings: request.servings,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(MealEntryResponse::from(entry))))
}

/// GET /api/meals?date=... - list a day's meals
pub async fn list_meals(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<DateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let date = query.resolve()?;
    let entries = state.meals.list_for_date(&user.user_id, date).await?;

    let response: Vec<MealEntryResponse> =
        entries.into_iter().map(MealEntryResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/summary?date=... - daily progress against targets
pub async fn daily_summary(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<DateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.daily_summary_handler();
    let summary = handler
        .handle(DailySummaryQuery {
            user_id: user.user_id,
            date: query.resolve()?,
        })
        .await?;

    Ok(Json(SummaryResponse::from(summary)))
}
