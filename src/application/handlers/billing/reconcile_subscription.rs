//! ReconcileSubscriptionHandler - server-side subscription re-check.
//!
//! Exists to paper over missed or delayed webhook deliveries. The
//! client triggers it on session start; the handler queries the
//! billing provider (cooldown permitting) and corrects the stored
//! status with a conditional write that loses to any concurrent
//! webhook write.

use std::sync::Arc;

use crate::domain::account::SubscriptionStatus;
use crate::domain::billing::{resolve_status, CooldownGate};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::{CasResult, PaymentProvider, UserRecordRepository};

/// Command to reconcile one user's subscription status.
#[derive(Debug, Clone)]
pub struct ReconcileSubscriptionCommand {
    pub user_id: UserId,
}

/// Result of a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// The resolved status the caller should gate on.
    pub status: SubscriptionStatus,

    /// Whether the billing provider was actually queried. False when
    /// the cooldown suppressed the query, the user has no customer
    /// id, or the provider call failed.
    pub checked: bool,

    /// Whether the stored record was corrected by this pass.
    pub corrected: bool,
}

/// Handler for the reconciliation path.
pub struct ReconcileSubscriptionHandler {
    users: Arc<dyn UserRecordRepository>,
    payment: Arc<dyn PaymentProvider>,
    cooldown: Arc<CooldownGate>,
}

impl ReconcileSubscriptionHandler {
    pub fn new(
        users: Arc<dyn UserRecordRepository>,
        payment: Arc<dyn PaymentProvider>,
        cooldown: Arc<CooldownGate>,
    ) -> Self {
        Self {
            users,
            payment,
            cooldown,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReconcileSubscriptionCommand,
    ) -> Result<ReconcileOutcome, DomainError> {
        let record = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "User record not found"))?;

        // Without a billing identity there is nothing to ask Stripe.
        let Some(customer_id) = record.stripe_customer_id.clone() else {
            return Ok(ReconcileOutcome {
                status: record.subscription_status,
                checked: false,
                corrected: false,
            });
        };

        let now = Timestamp::now();
        if !self.cooldown.try_acquire(&cmd.user_id, now).await {
            tracing::debug!(user_id = %cmd.user_id, "Reconciliation suppressed by cooldown");
            return Ok(ReconcileOutcome {
                status: record.subscription_status,
                checked: false,
                corrected: false,
            });
        }

        let provider_active = match self.payment.has_active_subscription(&customer_id).await {
            Ok(active) => active,
            Err(e) => {
                // Transient: answer with the stored status; the caller
                // can retry after the cooldown.
                tracing::warn!(
                    user_id = %cmd.user_id,
                    error = %e,
                    "Subscription check against provider failed"
                );
                return Ok(ReconcileOutcome {
                    status: record.subscription_status,
                    checked: false,
                    corrected: false,
                });
            }
        };

        let resolved = resolve_status(provider_active);
        if resolved == record.subscription_status {
            return Ok(ReconcileOutcome {
                status: resolved,
                checked: true,
                corrected: false,
            });
        }

        // Conditional write: a concurrent webhook write wins and this
        // stale snapshot is dropped.
        match self
            .users
            .update_status_if_unchanged(&cmd.user_id, record.updated_at, resolved, now)
            .await?
        {
            CasResult::Updated => {
                tracing::info!(
                    user_id = %cmd.user_id,
                    from = record.subscription_status.as_str(),
                    to = resolved.as_str(),
                    "Reconciliation corrected stored status"
                );
                Ok(ReconcileOutcome {
                    status: resolved,
                    checked: true,
                    corrected: true,
                })
            }
            CasResult::Stale => {
                // Re-read so the caller gates on the fresher value
                let fresh = self
                    .users
                    .find_by_id(&cmd.user_id)
                    .await?
                    .ok_or_else(|| {
                        DomainError::new(ErrorCode::UserNotFound, "User record not found")
                    })?;
                tracing::debug!(user_id = %cmd.user_id, "Reconciliation write lost to a newer write");
                Ok(ReconcileOutcome {
                    status: fresh.subscription_status,
                    checked: true,
                    corrected: false,
                })
            }
        }
    }
}
