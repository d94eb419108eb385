//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port over the Stripe REST API:
//! checkout sessions, billing portal sessions, and the
//! active-subscription query used by reconciliation.
//!
//! Requests are form-encoded with the API key as basic auth, per
//! Stripe's API conventions. The API base URL is overridable so tests
//! can point at a stub server.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentProvider, PortalSession,
};

use super::wire::{
    StripeCheckoutSessionResponse, StripeErrorResponse, StripePortalSessionResponse,
    StripeSubscriptionList,
};

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Price id of the subscription plan (price_...).
    price_id: String,

    /// Base URL for the Stripe API.
    api_base_url: String,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>, price_id: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            price_id: price_id.into(),
            api_base_url: "https://api.stripe.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Stripe payment provider adapter.
pub struct StripeBillingAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripeBillingAdapter {
    /// Create a new adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, PaymentError> {
        let url = format!("{}{}", self.config.api_base_url, path);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        Self::parse_response(path, response).await
    }

    async fn get_query<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, PaymentError> {
        let url = format!("{}{}", self.config.api_base_url, path);

        let response = self
            .http_client
            .get(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .query(query)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        Self::parse_response(path, response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, PaymentError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StripeErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or(body);
            tracing::error!(path, status = %status, error = %message, "Stripe API call failed");
            return Err(PaymentError::provider(format!(
                "Stripe API error: {}",
                message
            )));
        }

        response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })
    }
}

#[async_trait]
impl PaymentProvider for StripeBillingAdapter {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        // The user id rides along as metadata, client_reference_id,
        // and subscription metadata so every later webhook event can
        // be correlated back.
        let user_id = request.user_id.to_string();
        let params = vec![
            ("mode", "subscription".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][price]", self.config.price_id.clone()),
            ("line_items[0][quantity]", "1".to_string()),
            ("customer_email", request.email.clone()),
            ("client_reference_id", user_id.clone()),
            ("metadata[user_id]", user_id.clone()),
            ("subscription_data[metadata][user_id]", user_id),
            ("success_url", request.success_url.clone()),
            ("cancel_url", request.cancel_url.clone()),
        ];

        let session: StripeCheckoutSessionResponse =
            self.post_form("/v1/checkout/sessions", &params).await?;

        let url = session.url.ok_or_else(|| {
            PaymentError::provider("Checkout session has no redirect URL")
        })?;

        tracing::info!(session_id = %session.id, "Created checkout session");

        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<PortalSession, PaymentError> {
        let params = vec![
            ("customer", customer_id.to_string()),
            ("return_url", return_url.to_string()),
        ];

        let session: StripePortalSessionResponse = self
            .post_form("/v1/billing_portal/sessions", &params)
            .await?;

        Ok(PortalSession {
            id: session.id,
            url: session.url,
        })
    }

    async fn has_active_subscription(&self, customer_id: &str) -> Result<bool, PaymentError> {
        let list: StripeSubscriptionList = self
            .get_query(
                "/v1/subscriptions",
                &[
                    ("customer", customer_id),
                    ("status", "active"),
                    ("limit", "1"),
                ],
            )
            .await?;

        Ok(!list.data.is_empty())
    }
}
