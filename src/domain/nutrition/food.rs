//! Food definitions and macro amounts.

use serde::{Deserialize, Serialize};
use std::ops::Add;

use crate::domain::foundation::{FoodId, Timestamp, UserId, ValidationError};

/// Macro-nutrient amounts for one serving or one logged meal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Macros {
    /// Calories (kcal).
    pub calories: f64,

    /// Protein (grams).
    pub protein: f64,

    /// Carbohydrates (grams).
    pub carbs: f64,

    /// Fat (grams).
    pub fat: f64,
}

impl Macros {
    /// Creates macro amounts after checking for negative or
    /// non-finite values.
    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Result<Self, ValidationError> {
        for (field, value) in [
            ("calories", calories),
            ("protein", protein),
            ("carbs", carbs),
            ("fat", fat),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::invalid_format(
                    field,
                    format!("must be a non-negative number, got {}", value),
                ));
            }
        }

        Ok(Self {
            calories,
            protein,
            carbs,
            fat,
        })
    }

    /// Zero amounts.
    pub fn zero() -> Self {
        Self::default()
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, rhs: Macros) -> Macros {
        Macros {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

/// A food definition saved by a user, with macros per serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    /// Unique food id.
    pub id: FoodId,

    /// Owning user.
    pub user_id: UserId,

    /// Display name ("Chicken breast").
    pub name: String,

    /// Serving description ("100 g", "1 cup"). Free text.
    pub serving: String,

    /// Macros per serving.
    pub macros: Macros,

    /// When the food was created.
    pub created_at: Timestamp,
}

impl Food {
    /// Creates a new food definition.
    pub fn create(
        user_id: UserId,
        name: impl Into<String>,
        serving: impl Into<String>,
        macros: Macros,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        Ok(Self {
            id: FoodId::new(),
            user_id,
            name,
            serving: serving.into(),
            macros,
            created_at: now,
        })
    }
}
