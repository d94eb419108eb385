//! Stripe webhook event types.
//!
//! Defines the envelope for parsing Stripe webhook payloads plus the
//! payload objects we extract from it. Only fields relevant to our
//! processing are captured.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Stripe webhook event (simplified).
///
/// Contains the essential fields needed for webhook processing.
/// Additional fields from Stripe's full event schema are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub id: String,

    /// Type of event (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time at which the event was created (Unix timestamp).
    pub created: i64,

    /// Object containing event-specific data.
    pub data: StripeEventData,

    /// Whether this is a live mode event (vs test mode).
    pub livemode: bool,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object that triggered the event (polymorphic by event type).
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Parse the event type into a known enum variant.
    pub fn parsed_type(&self) -> StripeEventType {
        StripeEventType::from_event_name(&self.event_type)
    }

    /// Attempts to deserialize the data object as the specified type.
    pub fn deserialize_object<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }
}

/// Known Stripe event types that drive the subscription lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StripeEventType {
    /// Checkout session completed successfully.
    CheckoutSessionCompleted,
    /// Customer subscription was updated.
    CustomerSubscriptionUpdated,
    /// Customer subscription was deleted.
    CustomerSubscriptionDeleted,
    /// Unknown or unhandled event type.
    Unknown,
}

impl StripeEventType {
    /// Parse event type from the Stripe event name.
    pub fn from_event_name(s: &str) -> Self {
        match s {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            "customer.subscription.updated" => Self::CustomerSubscriptionUpdated,
            "customer.subscription.deleted" => Self::CustomerSubscriptionDeleted,
            _ => Self::Unknown,
        }
    }

    /// Convert to the Stripe event type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckoutSessionCompleted => "checkout.session.completed",
            Self::CustomerSubscriptionUpdated => "customer.subscription.updated",
            Self::CustomerSubscriptionDeleted => "customer.subscription.deleted",
            Self::Unknown => "unknown",
        }
    }
}

/// Checkout session object from `checkout.session.completed`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionObject {
    /// Session id (cs_xxx).
    pub id: String,

    /// Customer created for the session (cus_xxx).
    pub customer: Option<String>,

    /// Email the customer entered at checkout.
    pub customer_email: Option<String>,

    /// Client-supplied correlation id.
    pub client_reference_id: Option<String>,

    /// Subscription started by the session (sub_xxx).
    pub subscription: Option<String>,

    /// Metadata attached when the session was created.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSessionObject {
    /// Resolves the originating user id for this session.
    ///
    /// `metadata[user_id]` is authoritative; `metadata[userId]` covers
    /// sessions created by older clients, and `client_reference_id` is
    /// the final fallback.
    pub fn correlation_user_id(&self) -> Option<&str> {
        self.metadata
            .get("user_id")
            .or_else(|| self.metadata.get("userId"))
            .map(String::as_str)
            .or(self.client_reference_id.as_deref())
    }
}

/// Subscription object from `customer.subscription.*` events.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionObject {
    /// Subscription id (sub_xxx).
    pub id: String,

    /// Owning customer id (cus_xxx).
    pub customer: String,

    /// Provider status string ("active", "past_due", "canceled", ...).
    pub status: String,

    /// Metadata attached at checkout via subscription_data.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl SubscriptionObject {
    /// Returns true if the provider reports this subscription live.
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    /// User id threaded through subscription metadata, if present.
    pub fn metadata_user_id(&self) -> Option<&str> {
        self.metadata
            .get("user_id")
            .or_else(|| self.metadata.get("userId"))
            .map(String::as_str)
    }
}

#[cfg(test)]
pub struct StripeEventBuilder {
    id: String,
    event_type: String,
    created: i64,
    object: serde_json::Value,
    livemode: bool,
}

#[cfg(test)]
impl Default for StripeEventBuilder {
    fn default() -> Self {
        Self {
            id: "evt_test_123".to_string(),
            event_type: "checkout.session.completed".to_string(),
            created: 1_704_067_200,
            object: serde_json::json!({}),
            livemode: false,
        }
    }
}

#[cfg(test)]
impl StripeEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn object(mut self, object: serde_json::Value) -> Self {
        self.object = object;
        self
    }

    pub fn build(self) -> StripeEvent {
        StripeEvent {
            id: self.id,
            event_type: self.event_type,
            created: self.created,
            data: StripeEventData {
                object: self.object,
            },
            livemode: self.livemode,
        }
    }
}
