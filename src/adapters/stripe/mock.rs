//! Scriptable in-memory PaymentProvider for tests.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentProvider, PortalSession,
};

/// Mock payment provider.
///
/// Customers listed as active answer the reconciliation query with
/// true; `fail_next` makes the next call return a provider error.
#[derive(Default)]
pub struct MockPaymentProvider {
    active_customers: RwLock<HashSet<String>>,
    fail_all: RwLock<bool>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a customer as having a live active subscription.
    pub async fn set_active(&self, customer_id: &str) {
        self.active_customers
            .write()
            .await
            .insert(customer_id.to_string());
    }

    /// Removes a customer's active subscription.
    pub async fn set_inactive(&self, customer_id: &str) {
        self.active_customers.write().await.remove(customer_id);
    }

    /// Makes every call fail with a provider error.
    pub async fn fail_all(&self, fail: bool) {
        *self.fail_all.write().await = fail;
    }

    async fn check_failure(&self) -> Result<(), PaymentError> {
        if *self.fail_all.read().await {
            return Err(PaymentError::provider("Simulated Stripe outage"));
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        self.check_failure().await?;
        Ok(CheckoutSession {
            id: format!("cs_test_{}", request.user_id),
            url: format!(
                "https://checkout.stripe.com/c/pay/cs_test_{}",
                request.user_id
            ),
        })
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        _return_url: &str,
    ) -> Result<PortalSession, PaymentError> {
        self.check_failure().await?;
        Ok(PortalSession {
            id: format!("bps_test_{}", customer_id),
            url: format!("https://billing.stripe.com/session/{}", customer_id),
        })
    }

    async fn has_active_subscription(&self, customer_id: &str) -> Result<bool, PaymentError> {
        self.check_failure().await?;
        Ok(self.active_customers.read().await.contains(customer_id))
    }
}
