//! Daily progress summary - consumed macros against targets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::account::MacroTargets;

use super::{Macros, MealEntry};

/// Totals for one day measured against the user's targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// The day being summarized.
    pub date: NaiveDate,

    /// Sum of all logged meals for the day.
    pub consumed: Macros,

    /// The user's daily goals.
    pub targets: MacroTargets,

    /// Targets minus consumed, floored at zero.
    pub remaining: Macros,

    /// Number of meals logged.
    pub entry_count: usize,
}

impl DailySummary {
    /// Builds the summary for a day's entries.
    ///
    /// Entries for other dates are the caller's bug; only the totals
    /// of the given slice are computed here.
    pub fn from_entries(date: NaiveDate, entries: &[MealEntry], targets: MacroTargets) -> Self {
        let consumed = entries
            .iter()
            .fold(Macros::zero(), |acc, entry| acc + entry.macros);

        let remaining = Macros {
            calories: (f64::from(targets.calories) - consumed.calories).max(0.0),
            protein: (f64::from(targets.protein) - consumed.protein).max(0.0),
            carbs: (f64::from(targets.carbs) - consumed.carbs).max(0.0),
            fat: (f64::from(targets.fat) - consumed.fat).max(0.0),
        };

        Self {
            date,
            consumed,
            targets,
            remaining,
            entry_count: entries.len(),
        }
    }
}
