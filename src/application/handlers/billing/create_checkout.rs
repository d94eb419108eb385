//! CreateCheckoutHandler - starts the subscribe flow.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{CheckoutSession, CreateCheckoutRequest, PaymentProvider, UserRecordRepository};

/// Command to create a checkout session for a user.
#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub user_id: UserId,
    pub email: String,
}

/// Handler that creates Stripe checkout sessions.
///
/// Success and cancel URLs come from configuration so the redirect
/// targets stay consistent with the deployed front end.
pub struct CreateCheckoutHandler {
    users: Arc<dyn UserRecordRepository>,
    payment: Arc<dyn PaymentProvider>,
    success_url: String,
    cancel_url: String,
}

impl CreateCheckoutHandler {
    pub fn new(
        users: Arc<dyn UserRecordRepository>,
        payment: Arc<dyn PaymentProvider>,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        Self {
            users,
            payment,
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CheckoutSession, DomainError> {
        // The record must exist before checkout so the completion
        // webhook has something to activate.
        self.users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "User record not found"))?;

        let session = self
            .payment
            .create_checkout_session(CreateCheckoutRequest {
                user_id: cmd.user_id.clone(),
                email: cmd.email,
                success_url: self.success_url.clone(),
                cancel_url: self.cancel_url.clone(),
            })
            .await?;

        tracing::info!(user_id = %cmd.user_id, session_id = %session.id, "Checkout started");
        Ok(session)
    }
}
