//! UserRecordRepository port - persistence for user records.

use async_trait::async_trait;

use crate::domain::account::{SubscriptionStatus, UserRecord};
use crate::domain::foundation::{DomainError, Timestamp, UserId};

/// Result of a conditional status write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasResult {
    /// The record matched the expected revision and was updated.
    Updated,
    /// A concurrent writer got there first; nothing was written.
    Stale,
}

/// Port for the durable user record store.
///
/// The webhook handler is the authoritative status writer and uses the
/// unconditional `update`. Reconciliation corrections go through
/// `update_status_if_unchanged` so a racing webhook write wins.
#[async_trait]
pub trait UserRecordRepository: Send + Sync {
    /// Insert a new record. Fails with `AlreadyExists` if the user id
    /// is taken.
    async fn create(&self, record: &UserRecord) -> Result<(), DomainError>;

    /// Load a record by user id.
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<UserRecord>, DomainError>;

    /// Load a record through the customer index.
    ///
    /// Resolves subscription events whose metadata carries no user id.
    async fn find_by_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<UserRecord>, DomainError>;

    /// Write the full record unconditionally (webhook path).
    async fn update(&self, record: &UserRecord) -> Result<(), DomainError>;

    /// Conditionally set the subscription status (reconciliation
    /// path): the write only lands if `updated_at` still equals
    /// `expected_updated_at`.
    async fn update_status_if_unchanged(
        &self,
        user_id: &UserId,
        expected_updated_at: Timestamp,
        status: SubscriptionStatus,
        now: Timestamp,
    ) -> Result<CasResult, DomainError>;

    /// Upsert the customer index entry for a user.
    ///
    /// Written once when checkout completes so later subscription
    /// events resolve without a table scan.
    async fn link_customer(&self, user_id: &UserId, customer_id: &str)
        -> Result<(), DomainError>;
}
