//! HTTP DTOs for nutrition endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::account::MacroTargets;
use crate::domain::nutrition::{DailySummary, Food, Macros, MealEntry};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to save a food definition.
#[derive(Debug, Clone, Deserialize)]
pub struct FoodRequest {
    pub name: String,
    #[serde(default)]
    pub serving: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Request to log a meal.
///
/// Free-form meals carry `name` + macro fields; meals from the food
/// list carry `food_id` and an optional `servings` multiplier.
#[derive(Debug, Clone, Deserialize)]
pub struct LogMealRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub food_id: Option<String>,
    #[serde(default = "default_servings")]
    pub servings: f64,
}

fn default_servings() -> f64 {
    1.0
}

impl LogMealRequest {
    /// Collects the macro fields, requiring all four when any is set.
    pub fn macros(&self) -> Option<Macros> {
        match (self.calories, self.protein, self.carbs, self.fat) {
            (Some(calories), Some(protein), Some(carbs), Some(fat)) => Some(Macros {
                calories,
                protein,
                carbs,
                fat,
            }),
            _ => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Food view for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodResponse {
    pub id: String,
    pub name: String,
    pub serving: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub created_at: String,
}

impl From<Food> for FoodResponse {
    fn from(food: Food) -> Self {
        Self {
            id: food.id.to_string(),
            name: food.name,
            serving: food.serving,
            calories: food.macros.calories,
            protein: food.macros.protein,
            carbs: food.macros.carbs,
            fat: food.macros.fat,
            created_at: food.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Meal entry view for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEntryResponse {
    pub id: String,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub food_id: Option<String>,
    pub date: String,
    pub logged_at: String,
}

impl From<MealEntry> for MealEntryResponse {
    fn from(entry: MealEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            name: entry.name,
            calories: entry.macros.calories,
            protein: entry.macros.protein,
            carbs: entry.macros.carbs,
            fat: entry.macros.fat,
            food_id: entry.food_id.map(|id| id.to_string()),
            date: entry.date.to_string(),
            logged_at: entry.logged_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Daily progress view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub date: String,
    pub consumed: Macros,
    pub targets: MacroTargets,
    pub remaining: Macros,
    pub entry_count: usize,
}

impl From<DailySummary> for SummaryResponse {
    fn from(summary: DailySummary) -> Self {
        Self {
            date: summary.date.to_string(),
            consumed: summary.consumed,
            targets: summary.targets,
            remaining: summary.remaining,
            entry_count: summary.entry_count,
        }
    }
}
