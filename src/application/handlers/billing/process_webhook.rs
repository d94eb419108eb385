//! ProcessWebhookHandler - verifies and applies Stripe webhook events.
//!
//! The webhook path is the authoritative writer of subscription
//! status. Event kinds map to record mutations:
//!
//! - `checkout.session.completed` - resolve the user from the
//!   session's correlation id, store the customer id, upsert the
//!   customer index, set status active
//! - `customer.subscription.updated` - active iff the provider says
//!   active, else inactive
//! - `customer.subscription.deleted` - force inactive
//!
//! Users are resolved from metadata user id first, then through the
//! customer index. All mutations are absorbing, so redelivery on top
//! of the event-id idempotency check is harmless.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account::UserRecord;
use crate::domain::billing::{
    CheckoutSessionObject, IdempotentWebhookProcessor, StripeEvent, StripeEventType,
    SubscriptionObject, WebhookDispatcher, WebhookError, WebhookEventHandler, WebhookResult,
    WebhookVerifier,
};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{UserRecordRepository, WebhookEventRepository};

/// Command to process a raw webhook delivery.
#[derive(Debug, Clone)]
pub struct ProcessWebhookCommand {
    /// Raw request body, exactly as signed by Stripe.
    pub payload: Vec<u8>,
    /// Stripe-Signature header value.
    pub signature: String,
}

/// Handler applying subscription lifecycle events to user records.
struct SubscriptionEventHandler {
    users: Arc<dyn UserRecordRepository>,
}

impl SubscriptionEventHandler {
    /// Resolves the user a subscription event refers to.
    ///
    /// Metadata user id wins; the customer index is the fallback for
    /// events whose metadata was stripped.
    async fn resolve_user(&self, sub: &SubscriptionObject) -> Result<UserRecord, WebhookError> {
        if let Some(user_id) = sub.metadata_user_id() {
            let user_id = UserId::new(user_id)
                .map_err(|_| WebhookError::MissingCorrelation("user_id"))?;
            return self
                .users
                .find_by_id(&user_id)
                .await?
                .ok_or(WebhookError::UserNotFound);
        }

        match self.users.find_by_customer_id(&sub.customer).await? {
            Some(record) => Ok(record),
            None => {
                tracing::warn!(
                    customer_id = %sub.customer,
                    "Subscription event has no metadata user id and no index entry"
                );
                Err(WebhookError::MissingCorrelation("user_id"))
            }
        }
    }

    async fn handle_checkout_completed(&self, event: &StripeEvent) -> Result<(), WebhookError> {
        let session: CheckoutSessionObject = event
            .deserialize_object()
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        let user_id = session
            .correlation_user_id()
            .ok_or(WebhookError::MissingCorrelation("user_id"))?;
        let user_id =
            UserId::new(user_id).map_err(|_| WebhookError::MissingCorrelation("user_id"))?;
        let customer_id = session
            .customer
            .clone()
            .ok_or(WebhookError::MissingField("customer"))?;

        let mut record = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or(WebhookError::UserNotFound)?;

        let now = Timestamp::now();
        record.attach_customer(customer_id.as_str(), now);
        if let Some(email) = session.customer_email.clone() {
            record.email = email;
        }
        record
            .activate(now)
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        self.users.update(&record).await?;
        self.users.link_customer(&user_id, &customer_id).await?;

        tracing::info!(
            user_id = %user_id,
            customer_id = %customer_id,
            "Checkout completed, subscription activated"
        );
        Ok(())
    }

    async fn handle_subscription_updated(&self, event: &StripeEvent) -> Result<(), WebhookError> {
        let sub: SubscriptionObject = event
            .deserialize_object()
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        let mut record = self.resolve_user(&sub).await?;
        let now = Timestamp::now();

        if sub.is_active() {
            record.activate(now)
        } else {
            record.deactivate(now)
        }
        .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        self.users.update(&record).await?;

        tracing::info!(
            user_id = %record.user_id,
            provider_status = %sub.status,
            "Subscription update applied"
        );
        Ok(())
    }

    async fn handle_subscription_deleted(&self, event: &StripeEvent) -> Result<(), WebhookError> {
        let sub: SubscriptionObject = event
            .deserialize_object()
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        let mut record = self.resolve_user(&sub).await?;
        record
            .deactivate(Timestamp::now())
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        self.users.update(&record).await?;

        tracing::info!(user_id = %record.user_id, "Subscription deleted, access revoked");
        Ok(())
    }
}

#[async_trait]
impl WebhookEventHandler for SubscriptionEventHandler {
    fn handles(&self) -> Vec<StripeEventType> {
        vec![
            StripeEventType::CheckoutSessionCompleted,
            StripeEventType::CustomerSubscriptionUpdated,
            StripeEventType::CustomerSubscriptionDeleted,
        ]
    }

    async fn handle(&self, event: &StripeEvent) -> Result<(), WebhookError> {
        match event.parsed_type() {
            StripeEventType::CheckoutSessionCompleted => {
                self.handle_checkout_completed(event).await
            }
            StripeEventType::CustomerSubscriptionUpdated => {
                self.handle_subscription_updated(event).await
            }
            StripeEventType::CustomerSubscriptionDeleted => {
                self.handle_subscription_deleted(event).await
            }
            StripeEventType::Unknown => Err(WebhookError::Ignored(format!(
                "Unhandled event type: {}",
                event.event_type
            ))),
        }
    }
}

/// Routes subscription lifecycle events to the single handler.
struct BillingDispatcher {
    handler: SubscriptionEventHandler,
}

#[async_trait]
impl WebhookDispatcher for BillingDispatcher {
    fn get_handler(&self, event_type: &StripeEventType) -> Option<&dyn WebhookEventHandler> {
        if self.handler.handles().contains(event_type) {
            Some(&self.handler)
        } else {
            None
        }
    }
}

/// Handler for the full webhook pipeline: verify, then process
/// idempotently.
pub struct ProcessWebhookHandler {
    verifier: Arc<WebhookVerifier>,
    processor: IdempotentWebhookProcessor<BillingDispatcher>,
}

impl ProcessWebhookHandler {
    pub fn new(
        verifier: Arc<WebhookVerifier>,
        webhook_events: Arc<dyn WebhookEventRepository>,
        users: Arc<dyn UserRecordRepository>,
    ) -> Self {
        let dispatcher = BillingDispatcher {
            handler: SubscriptionEventHandler { users },
        };
        Self {
            verifier,
            processor: IdempotentWebhookProcessor::new(webhook_events, dispatcher),
        }
    }

    /// Verifies the signature and applies the event.
    ///
    /// Verification failures return before any store access, so an
    /// unsigned body can never cause a mutation.
    pub async fn handle(&self, cmd: ProcessWebhookCommand) -> Result<WebhookResult, WebhookError> {
        let event = self.verifier.verify_and_parse(&cmd.payload, &cmd.signature)?;

        tracing::debug!(event_id = %event.id, event_type = %event.event_type, "Webhook verified");

        self.processor.process(event).await
    }
}
