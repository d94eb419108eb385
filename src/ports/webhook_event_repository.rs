//! WebhookEventRepository port - tracking of processed Stripe webhooks.
//!
//! Enables idempotent webhook handling by recording which event ids
//! have already been handled, together with the outcome and the raw
//! payload for auditing.
//!
//! Stripe may deliver the same webhook multiple times (network
//! timeouts, 5xx responses, lost acknowledgements), so every handler
//! must tolerate redelivery. Successful and ignored outcomes are
//! final; failed outcomes stay retryable so that a later redelivery
//! can reprocess the event once the underlying issue clears.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::foundation::DomainError;

/// Outcome of processing a webhook event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingOutcome {
    /// Event was handled and state was mutated as needed.
    Success,
    /// Event was acknowledged without action (unhandled kind).
    Ignored,
    /// Processing failed; a redelivery may retry.
    Failed,
}

impl ProcessingOutcome {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingOutcome::Success => "success",
            ProcessingOutcome::Ignored => "ignored",
            ProcessingOutcome::Failed => "failed",
        }
    }

    /// Parses a stored outcome value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(ProcessingOutcome::Success),
            "ignored" => Some(ProcessingOutcome::Ignored),
            "failed" => Some(ProcessingOutcome::Failed),
            _ => None,
        }
    }
}

/// Record of a processed webhook event.
#[derive(Debug, Clone)]
pub struct WebhookEventRecord {
    /// Stripe event ID (evt_xxx format).
    pub event_id: String,

    /// Type of Stripe event (e.g., "checkout.session.completed").
    pub event_type: String,

    /// When the event was processed.
    pub processed_at: DateTime<Utc>,

    /// Result of processing.
    pub outcome: ProcessingOutcome,

    /// Error message or ignore reason, if any.
    pub error_message: Option<String>,

    /// Original event payload for debugging.
    pub payload: serde_json::Value,
}

impl WebhookEventRecord {
    /// Creates a new success record.
    pub fn success(
        event_id: impl Into<String>,
        event_type: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            event_type: event_type.into(),
            processed_at: Utc::now(),
            outcome: ProcessingOutcome::Success,
            error_message: None,
            payload,
        }
    }

    /// Creates a new ignored record.
    pub fn ignored(
        event_id: impl Into<String>,
        event_type: impl Into<String>,
        reason: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            event_type: event_type.into(),
            processed_at: Utc::now(),
            outcome: ProcessingOutcome::Ignored,
            error_message: Some(reason.into()),
            payload,
        }
    }

    /// Creates a new failure record.
    pub fn failed(
        event_id: impl Into<String>,
        event_type: impl Into<String>,
        error: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            event_type: event_type.into(),
            processed_at: Utc::now(),
            outcome: ProcessingOutcome::Failed,
            error_message: Some(error.into()),
            payload,
        }
    }
}

/// Result of attempting to save a webhook event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// Record was inserted, or a previous failed attempt was replaced.
    Inserted,
    /// A final (success/ignored) record already exists.
    AlreadyExists,
}

/// Port for storing and retrieving processed webhook events.
///
/// Implementations should use a PRIMARY KEY on event_id so that
/// concurrent deliveries of the same event race safely: exactly one
/// insert wins.
#[async_trait]
pub trait WebhookEventRepository: Send + Sync {
    /// Find a previously processed event by its Stripe event ID.
    ///
    /// Returns `None` if the event hasn't been processed yet.
    async fn find_by_event_id(
        &self,
        event_id: &str,
    ) -> Result<Option<WebhookEventRecord>, DomainError>;

    /// Attempt to save a webhook event record.
    ///
    /// Insert-if-absent, with one exception: an existing record whose
    /// outcome is `Failed` is overwritten, keeping failed events
    /// retryable across redeliveries. Returns `AlreadyExists` when a
    /// final record is already present (lost race or true duplicate).
    async fn save(&self, record: WebhookEventRecord) -> Result<SaveResult, DomainError>;

    /// Delete records older than the specified timestamp.
    ///
    /// Returns the number of records deleted. Used for retention.
    async fn delete_before(&self, timestamp: DateTime<Utc>) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_strings_roundtrip() {
        for outcome in [
            ProcessingOutcome::Success,
            ProcessingOutcome::Ignored,
            ProcessingOutcome::Failed,
        ] {
            assert_eq!(ProcessingOutcome::parse(outcome.as_str()), Some(outcome));
        }
        assert_eq!(ProcessingOutcome::parse("bogus"), None);
    }

    #[test]
    fn success_record_has_no_error_message() {
        let record = WebhookEventRecord::success("evt_1", "checkout.session.completed", serde_json::json!({}));
        assert_eq!(record.outcome, ProcessingOutcome::Success);
        assert!(record.error_message.is_none());
    }

    #[test]
    fn ignored_record_keeps_reason() {
        let record = WebhookEventRecord::ignored(
            "evt_1",
            "invoice.paid",
            "no handler",
            serde_json::json!({}),
        );
        assert_eq!(record.outcome, ProcessingOutcome::Ignored);
        assert_eq!(record.error_message.as_deref(), Some("no handler"));
    }

    #[test]
    fn failed_record_keeps_error() {
        let record = WebhookEventRecord::failed(
            "evt_1",
            "customer.subscription.updated",
            "user not found",
            serde_json::json!({}),
        );
        assert_eq!(record.outcome, ProcessingOutcome::Failed);
        assert_eq!(record.error_message.as_deref(), Some("user not found"));
    }
}
