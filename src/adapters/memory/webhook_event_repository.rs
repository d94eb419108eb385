//! In-memory implementation of WebhookEventRepository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::{ProcessingOutcome, SaveResult, WebhookEventRecord, WebhookEventRepository};

/// In-memory webhook idempotency store with the same save semantics
/// as the Postgres adapter: insert-if-absent, failed records are
/// overwritable.
#[derive(Default)]
pub struct InMemoryWebhookEventRepository {
    records: RwLock<HashMap<String, WebhookEventRecord>>,
}

impl InMemoryWebhookEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WebhookEventRepository for InMemoryWebhookEventRepository {
    async fn find_by_event_id(
        &self,
        event_id: &str,
    ) -> Result<Option<WebhookEventRecord>, DomainError> {
        Ok(self.records.read().await.get(event_id).cloned())
    }

    async fn save(&self, record: WebhookEventRecord) -> Result<SaveResult, DomainError> {
        let mut records = self.records.write().await;
        match records.get(&record.event_id) {
            Some(existing) if existing.outcome != ProcessingOutcome::Failed => {
                Ok(SaveResult::AlreadyExists)
            }
            _ => {
                records.insert(record.event_id.clone(), record);
                Ok(SaveResult::Inserted)
            }
        }
    }

    async fn delete_before(&self, timestamp: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, r| r.processed_at >= timestamp);
        Ok((before - records.len()) as u64)
    }
}
