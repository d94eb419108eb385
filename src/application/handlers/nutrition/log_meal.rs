//! LogMealHandler - appends a meal to today's log.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, FoodId, Timestamp, UserId};
use crate::domain::nutrition::{Macros, MealEntry};
use crate::ports::{FoodRepository, MealRepository};

/// Command to log a meal.
///
/// Either free-form (name + macros) or from a saved food, in which
/// case the food's name and per-serving macros are used scaled by
/// `servings`.
#[derive(Debug, Clone)]
pub struct LogMealCommand {
    pub user_id: UserId,
    pub name: Option<String>,
    pub macros: Option<Macros>,
    pub food_id: Option<FoodId>,
    pub servings: f64,
}

/// Handler appending meal entries.
pub struct LogMealHandler {
    meals: Arc<dyn MealRepository>,
    foods: Arc<dyn FoodRepository>,
}

impl LogMealHandler {
    pub fn new(meals: Arc<dyn MealRepository>, foods: Arc<dyn FoodRepository>) -> Self {
        Self { meals, foods }
    }

    pub async fn handle(&self, cmd: LogMealCommand) -> Result<MealEntry, DomainError> {
        if !cmd.servings.is_finite() || cmd.servings <= 0.0 {
            return Err(DomainError::validation(
                "servings",
                "Servings must be a positive number",
            ));
        }

        let (name, macros) = match cmd.food_id {
            Some(food_id) => {
                let food = self
                    .foods
                    .find_by_id(&food_id)
                    .await?
                    .filter(|f| f.user_id == cmd.user_id)
                    .ok_or_else(|| {
                        DomainError::new(ErrorCode::FoodNotFound, "Food not found")
                    })?;

                let macros = Macros::new(
                    food.macros.calories * cmd.servings,
                    food.macros.protein * cmd.servings,
                    food.macros.carbs * cmd.servings,
                    food.macros.fat * cmd.servings,
                )?;

                (cmd.name.unwrap_or(food.name), macros)
            }
            None => {
                let name = cmd
                    .name
                    .ok_or_else(|| DomainError::validation("name", "Meal name is required"))?;
                let macros = cmd.macros.ok_or_else(|| {
                    DomainError::validation("macros", "Macros are required for free-form meals")
                })?;
                // Re-run range checks; the DTO assembles values verbatim
                let macros =
                    Macros::new(macros.calories, macros.protein, macros.carbs, macros.fat)?;
                (name, macros)
            }
        };

        let entry = MealEntry::log(cmd.user_id, name, macros, cmd.food_id, Timestamp::now())?;
        self.meals.create(&entry).await?;

        Ok(entry)
    }
}
