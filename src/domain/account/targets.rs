//! Daily macro-nutrient targets.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Upper bound for a daily calorie target.
const MAX_CALORIES: u32 = 20_000;

/// Upper bound for a daily gram target (protein, carbs, fat).
const MAX_GRAMS: u32 = 2_000;

/// Daily macro-nutrient goals for a user.
///
/// New accounts start with the application defaults and adjust later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    /// Daily calorie target (kcal).
    pub calories: u32,

    /// Daily protein target (grams).
    pub protein: u32,

    /// Daily carbohydrate target (grams).
    pub carbs: u32,

    /// Daily fat target (grams).
    pub fat: u32,
}

impl MacroTargets {
    /// Creates targets after range validation.
    ///
    /// All values must be positive; calories are capped at 20 000 kcal
    /// and gram targets at 2 000 g.
    pub fn new(calories: u32, protein: u32, carbs: u32, fat: u32) -> Result<Self, ValidationError> {
        validate_range("calories", calories, MAX_CALORIES)?;
        validate_range("protein", protein, MAX_GRAMS)?;
        validate_range("carbs", carbs, MAX_GRAMS)?;
        validate_range("fat", fat, MAX_GRAMS)?;

        Ok(Self {
            calories,
            protein,
            carbs,
            fat,
        })
    }
}

impl Default for MacroTargets {
    /// Default targets assigned at sign-up: 2000 kcal, 140 g protein,
    /// 250 g carbs, 70 g fat.
    fn default() -> Self {
        Self {
            calories: 2000,
            protein: 140,
            carbs: 250,
            fat: 70,
        }
    }
}

fn validate_range(field: &str, value: u32, max: u32) -> Result<(), ValidationError> {
    if value == 0 || value > max {
        return Err(ValidationError::out_of_range(
            field,
            1,
            i64::from(max),
            i64::from(value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_match_signup_defaults() {
        let targets = MacroTargets::default();
        assert_eq!(targets.calories, 2000);
        assert_eq!(targets.protein, 140);
        assert_eq!(targets.carbs, 250);
        assert_eq!(targets.fat, 70);
    }

    #[test]
    fn new_accepts_reasonable_targets() {
        let targets = MacroTargets::new(2500, 180, 300, 80).unwrap();
        assert_eq!(targets.calories, 2500);
    }

    #[test]
    fn new_rejects_zero_values() {
        assert!(MacroTargets::new(0, 140, 250, 70).is_err());
        assert!(MacroTargets::new(2000, 0, 250, 70).is_err());
        assert!(MacroTargets::new(2000, 140, 0, 70).is_err());
        assert!(MacroTargets::new(2000, 140, 250, 0).is_err());
    }

    #[test]
    fn new_rejects_values_beyond_caps() {
        assert!(MacroTargets::new(20_001, 140, 250, 70).is_err());
        assert!(MacroTargets::new(2000, 2_001, 250, 70).is_err());
    }

    #[test]
    fn boundary_values_are_accepted() {
        assert!(MacroTargets::new(20_000, 2_000, 2_000, 2_000).is_ok());
        assert!(MacroTargets::new(1, 1, 1, 1).is_ok());
    }

    #[test]
    fn targets_serialize_to_flat_json() {
        let json = serde_json::to_value(MacroTargets::default()).unwrap();
        assert_eq!(json["calories"], 2000);
        assert_eq!(json["protein"], 140);
    }
}
