//! In-memory implementation of UserRecordRepository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::account::{SubscriptionStatus, UserRecord};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::{CasResult, UserRecordRepository};

/// In-memory user record store with the same conditional-write
/// semantics as the Postgres adapter.
#[derive(Default)]
pub struct InMemoryUserRecordRepository {
    records: RwLock<HashMap<UserId, UserRecord>>,
    customer_index: RwLock<HashMap<String, UserId>>,
}

impl InMemoryUserRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record, bypassing create-time checks. Test helper.
    pub async fn seed(&self, record: UserRecord) {
        if let Some(customer_id) = &record.stripe_customer_id {
            self.customer_index
                .write()
                .await
                .insert(customer_id.clone(), record.user_id.clone());
        }
        self.records
            .write()
            .await
            .insert(record.user_id.clone(), record);
    }
}

#[async_trait]
impl UserRecordRepository for InMemoryUserRecordRepository {
    async fn create(&self, record: &UserRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.user_id) {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                "User record already exists",
            ));
        }
        records.insert(record.user_id.clone(), record.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<UserRecord>, DomainError> {
        Ok(self.records.read().await.get(user_id).cloned())
    }

    async fn find_by_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<UserRecord>, DomainError> {
        let index = self.customer_index.read().await;
        let Some(user_id) = index.get(customer_id) else {
            return Ok(None);
        };
        Ok(self.records.read().await.get(user_id).cloned())
    }

    async fn update(&self, record: &UserRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if !records.contains_key(&record.user_id) {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                "User record not found",
            ));
        }
        records.insert(record.user_id.clone(), record.clone());
        Ok(())
    }

    async fn update_status_if_unchanged(
        &self,
        user_id: &UserId,
        expected_updated_at: Timestamp,
        status: SubscriptionStatus,
        now: Timestamp,
    ) -> Result<CasResult, DomainError> {
        let mut records = self.records.write().await;
        let record = records.get_mut(user_id).ok_or_else(|| {
            DomainError::new(ErrorCode::UserNotFound, "User record not found")
        })?;

        if record.updated_at != expected_updated_at {
            return Ok(CasResult::Stale);
        }

        record.subscription_status = status;
        record.updated_at = now;
        Ok(CasResult::Updated)
    }

    async fn link_customer(
        &self,
        user_id: &UserId,
        customer_id: &str,
    ) -> Result<(), DomainError> {
        self.customer_index
            .write()
            .await
            .insert(customer_id.to_string(), user_id.clone());
        Ok(())
    }
}
