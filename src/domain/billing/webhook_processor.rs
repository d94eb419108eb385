//! Webhook processor - orchestrates idempotent webhook event handling.
//!
//! Coordination layer between verified Stripe events and the domain
//! handlers, ensuring each event takes effect at most once.
//!
//! ## Processing steps
//!
//! 1. Look up the event id; a final (success/ignored) record
//!    short-circuits as already processed. A failed record does not,
//!    so Stripe's redelivery can retry transient failures.
//! 2. Dispatch to the handler for the event type.
//! 3. Record the outcome. Under concurrent delivery the first insert
//!    wins (PRIMARY KEY on event id); losers report already-processed.

use std::sync::Arc;

use async_trait::async_trait;

use crate::ports::{
    ProcessingOutcome, SaveResult, WebhookEventRecord, WebhookEventRepository,
};

use super::stripe_event::{StripeEvent, StripeEventType};
use super::webhook_errors::WebhookError;

/// Handler for a specific set of Stripe webhook event types.
///
/// Implementations should be stateless and perform the necessary
/// domain mutations for the events they declare.
#[async_trait]
pub trait WebhookEventHandler: Send + Sync {
    /// Returns the event type(s) this handler processes.
    fn handles(&self) -> Vec<StripeEventType>;

    /// Handles the webhook event.
    ///
    /// Returns `Ok(())` on success,
    /// `Err(WebhookError::Ignored(_))` if the event should be
    /// acknowledged without action, and other `Err` variants for
    /// actual failures.
    async fn handle(&self, event: &StripeEvent) -> Result<(), WebhookError>;
}

/// Dispatches webhook events to the appropriate handler.
#[async_trait]
pub trait WebhookDispatcher: Send + Sync {
    /// Find a handler for the given event type.
    fn get_handler(&self, event_type: &StripeEventType) -> Option<&dyn WebhookEventHandler>;

    /// Dispatch an event to its handler.
    ///
    /// Returns `Err(WebhookError::Ignored)` if no handler is registered.
    async fn dispatch(&self, event: &StripeEvent) -> Result<(), WebhookError> {
        let event_type = event.parsed_type();
        match self.get_handler(&event_type) {
            Some(handler) => handler.handle(event).await,
            None => Err(WebhookError::Ignored(format!(
                "No handler for event type: {}",
                event.event_type
            ))),
        }
    }
}

/// Result of webhook processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookResult {
    /// Event was processed (or recorded as ignored) this delivery.
    Processed,
    /// Event was already processed by an earlier delivery.
    AlreadyProcessed,
}

/// Processes webhook events with idempotency guarantees.
pub struct IdempotentWebhookProcessor<D: WebhookDispatcher> {
    repository: Arc<dyn WebhookEventRepository>,
    dispatcher: D,
}

impl<D: WebhookDispatcher> IdempotentWebhookProcessor<D> {
    /// Creates a new processor with the given repository and dispatcher.
    pub fn new(repository: Arc<dyn WebhookEventRepository>, dispatcher: D) -> Self {
        Self {
            repository,
            dispatcher,
        }
    }

    /// Process a webhook event at most once.
    ///
    /// # Returns
    ///
    /// - `Ok(WebhookResult::Processed)` - handled (or ignored) now
    /// - `Ok(WebhookResult::AlreadyProcessed)` - idempotent skip
    /// - `Err(_)` - processing failed; the recorded failure stays
    ///   retryable for the next delivery
    pub async fn process(&self, event: StripeEvent) -> Result<WebhookResult, WebhookError> {
        if let Some(existing) = self.repository.find_by_event_id(&event.id).await? {
            if existing.outcome != ProcessingOutcome::Failed {
                tracing::debug!(event_id = %event.id, "Duplicate webhook delivery skipped");
                return Ok(WebhookResult::AlreadyProcessed);
            }
            tracing::info!(event_id = %event.id, "Retrying previously failed webhook event");
        }

        let result = self.dispatcher.dispatch(&event).await;

        let payload = serde_json::to_value(&event)
            .map_err(|e| WebhookError::ParseError(format!("Failed to serialize event: {}", e)))?;

        let record = match &result {
            Ok(()) => WebhookEventRecord::success(&event.id, &event.event_type, payload),
            Err(WebhookError::Ignored(reason)) => {
                WebhookEventRecord::ignored(&event.id, &event.event_type, reason, payload)
            }
            Err(e) => {
                WebhookEventRecord::failed(&event.id, &event.event_type, e.to_string(), payload)
            }
        };

        match self.repository.save(record).await? {
            SaveResult::Inserted => match result {
                Ok(()) => Ok(WebhookResult::Processed),
                // Ignored events are acknowledged as processed
                Err(WebhookError::Ignored(_)) => Ok(WebhookResult::Processed),
                Err(e) => Err(e),
            },
            // Lost the race; another delivery already landed a final record
            SaveResult::AlreadyExists => Ok(WebhookResult::AlreadyProcessed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryWebhookEventRepository;
    use crate::domain::billing::stripe_event::StripeEventBuilder;
    use std::sync::atomic::{AtomicU32, Ordering};

    // ══════════════════════════════════════════════════════════════
    // Test Infrastructure
    // ══════════════════════════════════════════════════════════════

    /// Mock handler that tracks invocations.
    struct MockHandler {
        handles_types: Vec<StripeEventType>,
        call_count: AtomicU32,
        should_fail: bool,
        should_ignore: bool,
    }

    impl MockHandler {
        fn new(handles: Vec<StripeEventType>) -> Self {
            Self {
                handles_types: handles,
                call_count: AtomicU32::new(0),
                should_fail: false,
                should_ignore: false,
            }
        }

        fn failing(handles: Vec<StripeEventType>) -> Self {
            Self {
                should_fail: true,
                ..Self::new(handles)
            }
        }

        fn ignoring(handles: Vec<StripeEventType>) -> Self {
            Self {
                should_ignore: true,
                ..Self::new(handles)
            }
        }

        fn call_count(&self) -> u32 {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WebhookEventHandler for MockHandler {
        fn handles(&self) -> Vec<StripeEventType> {
            self.handles_types.clone()
        }

        async fn handle(&self, _event: &StripeEvent) -> Result<(), WebhookError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if self.should_fail {
                Err(WebhookError::Database("Simulated failure".to_string()))
            } else if self.should_ignore {
                Err(WebhookError::Ignored("Test ignore".to_string()))
            } else {
                Ok(())
            }
        }
    }

    /// Simple dispatcher that routes to a single handler.
    struct SingleHandlerDispatcher {
        handler: Arc<MockHandler>,
    }

    #[async_trait]
    impl WebhookDispatcher for SingleHandlerDispatcher {
        fn get_handler(&self, event_type: &StripeEventType) -> Option<&dyn WebhookEventHandler> {
            if self.handler.handles_types.contains(event_type) {
                Some(self.handler.as_ref())
            } else {
                None
            }
        }
    }

    fn processor_with(
        handler: Arc<MockHandler>,
    ) -> IdempotentWebhookProcessor<SingleHandlerDispatcher> {
        IdempotentWebhookProcessor::new(
            Arc::new(InMemoryWebhookEventRepository::new()),
            SingleHandlerDispatcher { handler },
        )
    }

    fn test_event(id: &str, event_type: &str) -> StripeEvent {
        StripeEventBuilder::new().id(id).event_type(event_type).build()
    }

    // ══════════════════════════════════════════════════════════════
    // Dispatcher Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn dispatcher_finds_handler_for_registered_type() {
        let handler = Arc::new(MockHandler::new(vec![StripeEventType::CheckoutSessionCompleted]));
        let dispatcher = SingleHandlerDispatcher { handler };

        assert!(dispatcher
            .get_handler(&StripeEventType::CheckoutSessionCompleted)
            .is_some());
        assert!(dispatcher
            .get_handler(&StripeEventType::CustomerSubscriptionDeleted)
            .is_none());
    }

    #[tokio::test]
    async fn dispatcher_ignores_unknown_event_types() {
        let handler = Arc::new(MockHandler::new(vec![StripeEventType::CheckoutSessionCompleted]));
        let dispatcher = SingleHandlerDispatcher { handler };
        let event = test_event("evt_unknown", "charge.refunded");

        let result = dispatcher.dispatch(&event).await;

        assert!(matches!(result, Err(WebhookError::Ignored(_))));
    }

    // ══════════════════════════════════════════════════════════════
    // Processor Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn processor_processes_new_event_successfully() {
        let handler = Arc::new(MockHandler::new(vec![StripeEventType::CheckoutSessionCompleted]));
        let processor = processor_with(handler.clone());

        let result = processor
            .process(test_event("evt_new", "checkout.session.completed"))
            .await;

        assert_eq!(result.unwrap(), WebhookResult::Processed);
        assert_eq!(handler.call_count(), 1);
    }

    #[tokio::test]
    async fn processor_skips_duplicate_events() {
        let handler = Arc::new(MockHandler::new(vec![StripeEventType::CheckoutSessionCompleted]));
        let processor = processor_with(handler.clone());

        processor
            .process(test_event("evt_dup", "checkout.session.completed"))
            .await
            .unwrap();
        let result = processor
            .process(test_event("evt_dup", "checkout.session.completed"))
            .await;

        assert_eq!(result.unwrap(), WebhookResult::AlreadyProcessed);
        assert_eq!(handler.call_count(), 1);
    }

    #[tokio::test]
    async fn processor_surfaces_handler_failure() {
        let handler = Arc::new(MockHandler::failing(vec![
            StripeEventType::CheckoutSessionCompleted,
        ]));
        let processor = processor_with(handler);

        let result = processor
            .process(test_event("evt_fail", "checkout.session.completed"))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn processor_retries_previously_failed_event() {
        let handler = Arc::new(MockHandler::failing(vec![
            StripeEventType::CheckoutSessionCompleted,
        ]));
        let processor = processor_with(handler.clone());

        let first = processor
            .process(test_event("evt_retry", "checkout.session.completed"))
            .await;
        assert!(first.is_err());

        // Redelivery reaches the handler again instead of short-circuiting
        let second = processor
            .process(test_event("evt_retry", "checkout.session.completed"))
            .await;
        assert!(second.is_err());
        assert_eq!(handler.call_count(), 2);
    }

    #[tokio::test]
    async fn processor_records_ignored_as_processed() {
        let handler = Arc::new(MockHandler::ignoring(vec![
            StripeEventType::CheckoutSessionCompleted,
        ]));
        let processor = processor_with(handler);

        let result = processor
            .process(test_event("evt_ignore", "checkout.session.completed"))
            .await;

        assert_eq!(result.unwrap(), WebhookResult::Processed);
    }

    #[tokio::test]
    async fn processor_handles_handler_not_found_as_ignored() {
        let handler = Arc::new(MockHandler::new(vec![StripeEventType::CheckoutSessionCompleted]));
        let processor = processor_with(handler);

        let result = processor
            .process(test_event("evt_no_handler", "customer.subscription.deleted"))
            .await;

        assert_eq!(result.unwrap(), WebhookResult::Processed);
    }

    #[tokio::test]
    async fn processor_processes_different_events_independently() {
        let handler = Arc::new(MockHandler::new(vec![
            StripeEventType::CheckoutSessionCompleted,
            StripeEventType::CustomerSubscriptionUpdated,
        ]));
        let processor = processor_with(handler.clone());

        let result1 = processor
            .process(test_event("evt_1", "checkout.session.completed"))
            .await;
        let result2 = processor
            .process(test_event("evt_2", "customer.subscription.updated"))
            .await;

        assert_eq!(result1.unwrap(), WebhookResult::Processed);
        assert_eq!(result2.unwrap(), WebhookResult::Processed);
        assert_eq!(handler.call_count(), 2);
    }
}
