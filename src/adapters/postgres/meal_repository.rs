//! PostgreSQL implementation of MealRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, FoodId, MealEntryId, Timestamp, UserId};
use crate::domain::nutrition::{Macros, MealEntry};
use crate::ports::MealRepository;

/// PostgreSQL implementation of the MealRepository port.
pub struct PostgresMealRepository {
    pool: PgPool,
}

impl PostgresMealRepository {
    /// Creates a repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MealEntryRow {
    id: Uuid,
    user_id: String,
    name: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    food_id: Option<Uuid>,
    entry_date: NaiveDate,
    logged_at: DateTime<Utc>,
}

impl TryFrom<MealEntryRow> for MealEntry {
    type Error = DomainError;

    fn try_from(row: MealEntryRow) -> Result<Self, Self::Error> {
        let macros = Macros::new(row.calories, row.protein, row.carbs, row.fat)
            .map_err(|e| DomainError::database(format!("Invalid stored macros: {}", e)))?;

        Ok(MealEntry {
            id: MealEntryId::from_uuid(row.id),
            user_id: UserId::new(row.user_id)
                .map_err(|e| DomainError::database(format!("Invalid user_id: {}", e)))?,
            name: row.name,
            macros,
            food_id: row.food_id.map(FoodId::from_uuid),
            date: row.entry_date,
            logged_at: Timestamp::from_datetime(row.logged_at),
        })
    }
}

#[async_trait]
impl MealRepository for PostgresMealRepository {
    async fn create(&self, entry: &MealEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO meal_entries (
                id, user_id, name, calories, protein, carbs, fat,
                food_id, entry_date, logged_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.user_id.as_str())
        .bind(&entry.name)
        .bind(entry.macros.calories)
        .bind(entry.macros.protein)
        .bind(entry.macros.carbs)
        .bind(entry.macros.fat)
        .bind(entry.food_id.map(|id| *id.as_uuid()))
        .bind(entry.date)
        .bind(entry.logged_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to create meal entry: {}", e)))?;

        Ok(())
    }

    async fn list_for_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Vec<MealEntry>, DomainError> {
        let rows: Vec<MealEntryRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, calories, protein, carbs, fat,
                   food_id, entry_date, logged_at
            FROM meal_entries
            WHERE user_id = $1 AND entry_date = $2
            ORDER BY logged_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list meal entries: {}", e)))?;

        rows.into_iter().map(MealEntry::try_from).collect()
    }
}
