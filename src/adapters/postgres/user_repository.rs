//! PostgreSQL implementation of UserRecordRepository.
//!
//! One row per user in `users`; the customer reverse lookup goes
//! through `customer_index` instead of scanning for a match.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::account::{MacroTargets, SubscriptionStatus, UserRecord};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::{CasResult, UserRecordRepository};

/// PostgreSQL implementation of the UserRecordRepository port.
pub struct PostgresUserRecordRepository {
    pool: PgPool,
}

impl PostgresUserRecordRepository {
    /// Creates a repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user record.
#[derive(Debug, sqlx::FromRow)]
struct UserRecordRow {
    user_id: String,
    email: String,
    subscription_status: String,
    stripe_customer_id: Option<String>,
    target_calories: i32,
    target_protein: i32,
    target_carbs: i32,
    target_fat: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRecordRow> for UserRecord {
    type Error = DomainError;

    fn try_from(row: UserRecordRow) -> Result<Self, Self::Error> {
        let status = SubscriptionStatus::parse_stored(&row.subscription_status).ok_or_else(|| {
            DomainError::database(format!(
                "Invalid subscription_status value: {}",
                row.subscription_status
            ))
        })?;

        let targets = MacroTargets::new(
            row.target_calories as u32,
            row.target_protein as u32,
            row.target_carbs as u32,
            row.target_fat as u32,
        )
        .map_err(|e| DomainError::database(format!("Invalid stored targets: {}", e)))?;

        Ok(UserRecord {
            user_id: UserId::new(row.user_id)
                .map_err(|e| DomainError::database(format!("Invalid user_id: {}", e)))?,
            email: row.email,
            subscription_status: status,
            stripe_customer_id: row.stripe_customer_id,
            targets,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str = "user_id, email, subscription_status, stripe_customer_id, \
     target_calories, target_protein, target_carbs, target_fat, created_at, updated_at";

#[async_trait]
impl UserRecordRepository for PostgresUserRecordRepository {
    async fn create(&self, record: &UserRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id, email, subscription_status, stripe_customer_id,
                target_calories, target_protein, target_carbs, target_fat,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(record.user_id.as_str())
        .bind(&record.email)
        .bind(record.subscription_status.as_str())
        .bind(&record.stripe_customer_id)
        .bind(record.targets.calories as i32)
        .bind(record.targets.protein as i32)
        .bind(record.targets.carbs as i32)
        .bind(record.targets.fat as i32)
        .bind(record.created_at.as_datetime())
        .bind(record.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return DomainError::new(
                        ErrorCode::AlreadyExists,
                        "User record already exists",
                    );
                }
            }
            DomainError::database(format!("Failed to create user record: {}", e))
        })?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<UserRecord>, DomainError> {
        let row: Option<UserRecordRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find user record: {}", e)))?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn find_by_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<UserRecord>, DomainError> {
        let row: Option<UserRecordRow> = sqlx::query_as(
            r#"
            SELECT u.user_id, u.email, u.subscription_status, u.stripe_customer_id,
                   u.target_calories, u.target_protein, u.target_carbs, u.target_fat,
                   u.created_at, u.updated_at
            FROM users u
            JOIN customer_index ci ON ci.user_id = u.user_id
            WHERE ci.stripe_customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to find user by customer id: {}", e))
        })?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn update(&self, record: &UserRecord) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                subscription_status = $3,
                stripe_customer_id = $4,
                target_calories = $5,
                target_protein = $6,
                target_carbs = $7,
                target_fat = $8,
                updated_at = $9
            WHERE user_id = $1
            "#,
        )
        .bind(record.user_id.as_str())
        .bind(&record.email)
        .bind(record.subscription_status.as_str())
        .bind(&record.stripe_customer_id)
        .bind(record.targets.calories as i32)
        .bind(record.targets.protein as i32)
        .bind(record.targets.carbs as i32)
        .bind(record.targets.fat as i32)
        .bind(record.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update user record: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                "User record not found",
            ));
        }

        Ok(())
    }

    async fn update_status_if_unchanged(
        &self,
        user_id: &UserId,
        expected_updated_at: Timestamp,
        status: SubscriptionStatus,
        now: Timestamp,
    ) -> Result<CasResult, DomainError> {
        // Single-statement compare-and-set: the row's updated_at is
        // the revision token. A concurrent webhook write bumps it and
        // this update affects zero rows.
        let result = sqlx::query(
            r#"
            UPDATE users SET
                subscription_status = $3,
                updated_at = $4
            WHERE user_id = $1 AND updated_at = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(expected_updated_at.as_datetime())
        .bind(status.as_str())
        .bind(now.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed conditional status update: {}", e)))?;

        if result.rows_affected() == 0 {
            Ok(CasResult::Stale)
        } else {
            Ok(CasResult::Updated)
        }
    }

    async fn link_customer(
        &self,
        user_id: &UserId,
        customer_id: &str,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO customer_index (stripe_customer_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (stripe_customer_id) DO UPDATE SET user_id = EXCLUDED.user_id
            "#,
        )
        .bind(customer_id)
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to link customer: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_conversion_accepts_valid_status() {
        let row = UserRecordRow {
            user_id: "u1".to_string(),
            email: "u1@example.com".to_string(),
            subscription_status: "active".to_string(),
            stripe_customer_id: Some("cus_1".to_string()),
            target_calories: 2000,
            target_protein: 140,
            target_carbs: 250,
            target_fat: 70,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let record = UserRecord::try_from(row).unwrap();
        assert_eq!(record.subscription_status, SubscriptionStatus::Active);
        assert_eq!(record.targets.calories, 2000);
    }

    #[test]
    fn row_conversion_rejects_invalid_status() {
        let row = UserRecordRow {
            user_id: "u1".to_string(),
            email: "u1@example.com".to_string(),
            subscription_status: "paused".to_string(),
            stripe_customer_id: None,
            target_calories: 2000,
            target_protein: 140,
            target_carbs: 250,
            target_fat: 70,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(UserRecord::try_from(row).is_err());
    }

    #[test]
    fn row_conversion_rejects_corrupt_targets() {
        let row = UserRecordRow {
            user_id: "u1".to_string(),
            email: "u1@example.com".to_string(),
            subscription_status: "inactive".to_string(),
            stripe_customer_id: None,
            target_calories: 0,
            target_protein: 140,
            target_carbs: 250,
            target_fat: 70,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(UserRecord::try_from(row).is_err());
    }
}
