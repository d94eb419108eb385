//! Subscription reconciliation policy.
//!
//! The webhook path is the authoritative status writer; this module
//! holds the policy for the lazy self-heal path that papers over
//! missed or delayed webhook deliveries. It answers two questions:
//! is a provider query allowed right now (cooldown), and what status
//! does a provider answer resolve to.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::account::SubscriptionStatus;
use crate::domain::foundation::{Timestamp, UserId};

/// Cooldown between provider queries for one user (5 minutes).
pub const RECONCILE_COOLDOWN_SECS: u64 = 300;

/// Resolves a provider answer to a subscription status.
///
/// Active is only ever produced from a confirmed provider response;
/// everything else is Inactive.
pub fn resolve_status(provider_reports_active: bool) -> SubscriptionStatus {
    if provider_reports_active {
        SubscriptionStatus::Active
    } else {
        SubscriptionStatus::Inactive
    }
}

/// Per-user rate limit on provider queries.
///
/// The first check for a user always passes; later checks pass once
/// the cooldown window has elapsed. State is in-process only: it
/// bounds how often Stripe is queried, never correctness.
pub struct CooldownGate {
    window_secs: u64,
    last_checked: RwLock<HashMap<UserId, Timestamp>>,
}

impl CooldownGate {
    /// Creates a gate with the given window.
    pub fn new(window_secs: u64) -> Self {
        Self {
            window_secs,
            last_checked: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a gate with the default 5-minute window.
    pub fn with_default_window() -> Self {
        Self::new(RECONCILE_COOLDOWN_SECS)
    }

    /// Returns true if a provider query is allowed for this user now,
    /// and marks the query time on success.
    pub async fn try_acquire(&self, user_id: &UserId, now: Timestamp) -> bool {
        let mut guard = self.last_checked.write().await;
        match guard.get(user_id) {
            Some(last) if now.duration_since(last).num_seconds() < self.window_secs as i64 => {
                false
            }
            _ => {
                guard.insert(user_id.clone(), now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    #[test]
    fn provider_active_resolves_to_active() {
        assert_eq!(resolve_status(true), SubscriptionStatus::Active);
    }

    #[test]
    fn provider_inactive_resolves_to_inactive() {
        assert_eq!(resolve_status(false), SubscriptionStatus::Inactive);
    }

    #[tokio::test]
    async fn first_check_always_passes() {
        let gate = CooldownGate::with_default_window();
        assert!(gate.try_acquire(&user(), Timestamp::from_unix_secs(1000)).await);
    }

    #[tokio::test]
    async fn check_within_window_is_blocked() {
        let gate = CooldownGate::new(300);
        let t0 = Timestamp::from_unix_secs(1000);

        assert!(gate.try_acquire(&user(), t0).await);
        assert!(!gate.try_acquire(&user(), t0.plus_secs(60)).await);
        assert!(!gate.try_acquire(&user(), t0.plus_secs(299)).await);
    }

    #[tokio::test]
    async fn check_after_window_passes_and_rearms() {
        let gate = CooldownGate::new(300);
        let t0 = Timestamp::from_unix_secs(1000);

        assert!(gate.try_acquire(&user(), t0).await);
        assert!(gate.try_acquire(&user(), t0.plus_secs(300)).await);
        // Window restarts from the second acquisition
        assert!(!gate.try_acquire(&user(), t0.plus_secs(400)).await);
    }

    #[tokio::test]
    async fn cooldowns_are_tracked_per_user() {
        let gate = CooldownGate::new(300);
        let t0 = Timestamp::from_unix_secs(1000);
        let other = UserId::new("u2").unwrap();

        assert!(gate.try_acquire(&user(), t0).await);
        assert!(gate.try_acquire(&other, t0).await);
        assert!(!gate.try_acquire(&user(), t0.plus_secs(10)).await);
    }
}
