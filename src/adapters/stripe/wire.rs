//! Wire types for Stripe REST responses.
//!
//! Only the fields we read are declared; Stripe's full schemas are
//! much larger and ignored.

use serde::Deserialize;

/// Checkout session response from `/v1/checkout/sessions`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCheckoutSessionResponse {
    pub id: String,
    pub url: Option<String>,
}

/// Billing portal session response from `/v1/billing_portal/sessions`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripePortalSessionResponse {
    pub id: String,
    pub url: String,
}

/// Subscription list response from `/v1/subscriptions`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscriptionList {
    #[serde(default)]
    pub data: Vec<StripeSubscriptionSummary>,
}

/// One subscription in a list response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscriptionSummary {
    pub id: String,
    pub status: String,
}

/// Error envelope Stripe returns on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeErrorBody,
}

/// Error detail inside the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_session_response_parses() {
        let json = r#"{"id":"cs_test_1","url":"https://checkout.stripe.com/c/pay/cs_test_1","object":"checkout.session"}"#;
        let session: StripeCheckoutSessionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(session.id, "cs_test_1");
        assert!(session.url.is_some());
    }

    #[test]
    fn subscription_list_parses_empty_data() {
        let json = r#"{"object":"list","data":[],"has_more":false}"#;
        let list: StripeSubscriptionList = serde_json::from_str(json).unwrap();
        assert!(list.data.is_empty());
    }

    #[test]
    fn subscription_list_parses_entries() {
        let json = r#"{"object":"list","data":[{"id":"sub_1","status":"active","customer":"cus_1"}]}"#;
        let list: StripeSubscriptionList = serde_json::from_str(json).unwrap();
        assert_eq!(list.data.len(), 1);
        assert_eq!(list.data[0].status, "active");
    }

    #[test]
    fn error_envelope_parses() {
        let json = r#"{"error":{"message":"No such customer: cus_x","type":"invalid_request_error"}}"#;
        let err: StripeErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(err.error.error_type.as_deref(), Some("invalid_request_error"));
    }
}
