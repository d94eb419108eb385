//! CreatePortalHandler - opens the billing portal.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{PaymentProvider, PortalSession, UserRecordRepository};

/// Command to create a billing portal session.
#[derive(Debug, Clone)]
pub struct CreatePortalCommand {
    pub user_id: UserId,
}

/// Handler that creates billing portal sessions for subscribed users.
pub struct CreatePortalHandler {
    users: Arc<dyn UserRecordRepository>,
    payment: Arc<dyn PaymentProvider>,
    return_url: String,
}

impl CreatePortalHandler {
    pub fn new(
        users: Arc<dyn UserRecordRepository>,
        payment: Arc<dyn PaymentProvider>,
        return_url: impl Into<String>,
    ) -> Self {
        Self {
            users,
            payment,
            return_url: return_url.into(),
        }
    }

    pub async fn handle(&self, cmd: CreatePortalCommand) -> Result<PortalSession, DomainError> {
        let record = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "User record not found"))?;

        let customer_id = record.stripe_customer_id.ok_or_else(|| {
            DomainError::validation(
                "stripe_customer_id",
                "No billing customer associated with this user",
            )
        })?;

        let session = self
            .payment
            .create_portal_session(&customer_id, &self.return_url)
            .await?;

        Ok(session)
    }
}
