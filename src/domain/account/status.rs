//! Subscription status state machine.
//!
//! The stored record only ever holds `Active` or `Inactive`; `Unknown`
//! is the logical state before a user's record has been read, and is
//! what route gating sees until the first reconciliation resolves.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Subscription status of a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Not yet resolved; no stored record has been read.
    Unknown,

    /// Billing provider reports a live subscription. Full access.
    Active,

    /// No live subscription. Access to paid areas is denied.
    Inactive,
}

impl SubscriptionStatus {
    /// Returns true if this status grants access to paid areas.
    pub fn has_access(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }

    /// Returns the storage representation.
    ///
    /// `Unknown` is never persisted; records are created `Inactive`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Unknown => "unknown",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Inactive => "inactive",
        }
    }

    /// Parses a stored status value.
    ///
    /// Only `active` and `inactive` are valid stored values.
    pub fn parse_stored(s: &str) -> Option<Self> {
        match s {
            "active" => Some(SubscriptionStatus::Active),
            "inactive" => Some(SubscriptionStatus::Inactive),
            _ => None,
        }
    }
}

impl StateMachine for SubscriptionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubscriptionStatus::*;
        matches!(
            (self, target),
            // First resolution
            (Unknown, Active)
                | (Unknown, Inactive)
            // Webhook redelivery and renewals are absorbing
                | (Active, Active)
                | (Active, Inactive)
            // Lapsed subscriptions can come back
                | (Inactive, Active)
                | (Inactive, Inactive)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SubscriptionStatus::*;
        match self {
            Unknown => vec![Active, Inactive],
            Active => vec![Active, Inactive],
            Inactive => vec![Active, Inactive],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_can_resolve_to_either_status() {
        assert!(SubscriptionStatus::Unknown.can_transition_to(&SubscriptionStatus::Active));
        assert!(SubscriptionStatus::Unknown.can_transition_to(&SubscriptionStatus::Inactive));
    }

    #[test]
    fn active_and_inactive_cycle_indefinitely() {
        assert!(SubscriptionStatus::Active.can_transition_to(&SubscriptionStatus::Inactive));
        assert!(SubscriptionStatus::Inactive.can_transition_to(&SubscriptionStatus::Active));
    }

    #[test]
    fn repeated_delivery_of_same_state_is_valid() {
        // Stripe redelivers events; writing the same status twice must be legal.
        assert!(SubscriptionStatus::Active.can_transition_to(&SubscriptionStatus::Active));
        assert!(SubscriptionStatus::Inactive.can_transition_to(&SubscriptionStatus::Inactive));
    }

    #[test]
    fn resolved_states_cannot_return_to_unknown() {
        assert!(!SubscriptionStatus::Active.can_transition_to(&SubscriptionStatus::Unknown));
        assert!(!SubscriptionStatus::Inactive.can_transition_to(&SubscriptionStatus::Unknown));
    }

    #[test]
    fn no_status_is_terminal() {
        assert!(!SubscriptionStatus::Unknown.is_terminal());
        assert!(!SubscriptionStatus::Active.is_terminal());
        assert!(!SubscriptionStatus::Inactive.is_terminal());
    }

    #[test]
    fn only_active_has_access() {
        assert!(SubscriptionStatus::Active.has_access());
        assert!(!SubscriptionStatus::Inactive.has_access());
        assert!(!SubscriptionStatus::Unknown.has_access());
    }

    #[test]
    fn parse_stored_accepts_persisted_values_only() {
        assert_eq!(
            SubscriptionStatus::parse_stored("active"),
            Some(SubscriptionStatus::Active)
        );
        assert_eq!(
            SubscriptionStatus::parse_stored("inactive"),
            Some(SubscriptionStatus::Inactive)
        );
        assert_eq!(SubscriptionStatus::parse_stored("unknown"), None);
        assert_eq!(SubscriptionStatus::parse_stored(""), None);
    }

    #[test]
    fn as_str_roundtrips_for_stored_values() {
        for status in [SubscriptionStatus::Active, SubscriptionStatus::Inactive] {
            assert_eq!(SubscriptionStatus::parse_stored(status.as_str()), Some(status));
        }
    }
}
