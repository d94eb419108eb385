//! PostgreSQL implementation of FoodRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, FoodId, Timestamp, UserId};
use crate::domain::nutrition::{Food, Macros};
use crate::ports::FoodRepository;

/// PostgreSQL implementation of the FoodRepository port.
pub struct PostgresFoodRepository {
    pool: PgPool,
}

impl PostgresFoodRepository {
    /// Creates a repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FoodRow {
    id: Uuid,
    user_id: String,
    name: String,
    serving: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    created_at: DateTime<Utc>,
}

impl TryFrom<FoodRow> for Food {
    type Error = DomainError;

    fn try_from(row: FoodRow) -> Result<Self, Self::Error> {
        let macros = Macros::new(row.calories, row.protein, row.carbs, row.fat)
            .map_err(|e| DomainError::database(format!("Invalid stored macros: {}", e)))?;

        Ok(Food {
            id: FoodId::from_uuid(row.id),
            user_id: UserId::new(row.user_id)
                .map_err(|e| DomainError::database(format!("Invalid user_id: {}", e)))?,
            name: row.name,
            serving: row.serving,
            macros,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl FoodRepository for PostgresFoodRepository {
    async fn create(&self, food: &Food) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO foods (id, user_id, name, serving, calories, protein, carbs, fat, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(food.id.as_uuid())
        .bind(food.user_id.as_str())
        .bind(&food.name)
        .bind(&food.serving)
        .bind(food.macros.calories)
        .bind(food.macros.protein)
        .bind(food.macros.carbs)
        .bind(food.macros.fat)
        .bind(food.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to create food: {}", e)))?;

        Ok(())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Food>, DomainError> {
        let rows: Vec<FoodRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, serving, calories, protein, carbs, fat, created_at
            FROM foods
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list foods: {}", e)))?;

        rows.into_iter().map(Food::try_from).collect()
    }

    async fn find_by_id(&self, id: &FoodId) -> Result<Option<Food>, DomainError> {
        let row: Option<FoodRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, serving, calories, protein, carbs, fat, created_at
            FROM foods
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find food: {}", e)))?;

        row.map(Food::try_from).transpose()
    }

    async fn delete(&self, user_id: &UserId, id: &FoodId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM foods WHERE id = $1 AND user_id = $2")
            .bind(id.as_uuid())
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete food: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::FoodNotFound, "Food not found"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_conversion_builds_food() {
        let row = FoodRow {
            id: Uuid::new_v4(),
            user_id: "u1".to_string(),
            name: "Oats".to_string(),
            serving: "50 g".to_string(),
            calories: 190.0,
            protein: 6.5,
            carbs: 33.0,
            fat: 3.5,
            created_at: Utc::now(),
        };

        let food = Food::try_from(row).unwrap();
        assert_eq!(food.name, "Oats");
        assert_eq!(food.macros.carbs, 33.0);
    }

    #[test]
    fn row_conversion_rejects_negative_macros() {
        let row = FoodRow {
            id: Uuid::new_v4(),
            user_id: "u1".to_string(),
            name: "Oats".to_string(),
            serving: "50 g".to_string(),
            calories: -190.0,
            protein: 6.5,
            carbs: 33.0,
            fat: 3.5,
            created_at: Utc::now(),
        };

        assert!(Food::try_from(row).is_err());
    }
}
