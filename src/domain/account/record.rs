//! UserRecord aggregate - the durable per-user document.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, Timestamp, UserId, ValidationError};

use super::{MacroTargets, SubscriptionStatus};

/// Durable record for one user.
///
/// Created at sign-up, mutated by the webhook handler, the
/// reconciliation handler, and targets updates. Never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Opaque user id from the auth provider.
    pub user_id: UserId,

    /// Contact email, kept in sync with checkout data.
    pub email: String,

    /// Current subscription status (stored: active or inactive).
    pub subscription_status: SubscriptionStatus,

    /// Billing provider customer id, set when checkout completes.
    pub stripe_customer_id: Option<String>,

    /// Daily macro goals.
    pub targets: MacroTargets,

    /// When the record was created.
    pub created_at: Timestamp,

    /// When the record was last written. Reconciliation writes
    /// compare-and-set against this value.
    pub updated_at: Timestamp,
}

impl UserRecord {
    /// Creates a fresh record at sign-up: inactive, default targets.
    pub fn register(user_id: UserId, email: impl Into<String>, now: Timestamp) -> Self {
        Self {
            user_id,
            email: email.into(),
            subscription_status: SubscriptionStatus::Inactive,
            stripe_customer_id: None,
            targets: MacroTargets::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the user may enter paid areas.
    pub fn has_access(&self) -> bool {
        self.subscription_status.has_access()
    }

    /// Marks the subscription active.
    pub fn activate(&mut self, now: Timestamp) -> Result<(), ValidationError> {
        self.subscription_status = self
            .subscription_status
            .transition_to(SubscriptionStatus::Active)?;
        self.updated_at = now;
        Ok(())
    }

    /// Marks the subscription inactive.
    pub fn deactivate(&mut self, now: Timestamp) -> Result<(), ValidationError> {
        self.subscription_status = self
            .subscription_status
            .transition_to(SubscriptionStatus::Inactive)?;
        self.updated_at = now;
        Ok(())
    }

    /// Links the billing provider customer created at checkout.
    pub fn attach_customer(&mut self, customer_id: impl Into<String>, now: Timestamp) {
        self.stripe_customer_id = Some(customer_id.into());
        self.updated_at = now;
    }

    /// Replaces the daily macro targets.
    pub fn set_targets(&mut self, targets: MacroTargets, now: Timestamp) {
        self.targets = targets;
        self.updated_at = now;
    }
}
