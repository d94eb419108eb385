//! HTTP DTOs for billing endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::account::SubscriptionStatus;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to start a checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    /// The subscribing user.
    pub user_id: String,
    /// Email to pre-fill at checkout.
    pub email: String,
}

/// Request to open the billing portal.
#[derive(Debug, Clone, Deserialize)]
pub struct PortalRequest {
    /// The user whose subscription is managed.
    pub user_id: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Redirect target for checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub url: String,
}

/// Redirect target for the billing portal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalResponse {
    pub url: String,
}

/// Result of a reconciliation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileResponse {
    /// The resolved status to gate on.
    pub status: SubscriptionStatus,
    /// Whether the billing provider was queried.
    pub checked: bool,
    /// Whether the stored record was corrected.
    pub corrected: bool,
}

/// Webhook acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_request_deserializes() {
        let json = r#"{"user_id":"u1","email":"u1@example.com"}"#;
        let request: CheckoutRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.user_id, "u1");
        assert_eq!(request.email, "u1@example.com");
    }

    #[test]
    fn reconcile_response_serializes_status_snake_case() {
        let response = ReconcileResponse {
            status: SubscriptionStatus::Active,
            checked: true,
            corrected: false,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn webhook_ack_matches_expected_shape() {
        let json = serde_json::to_string(&WebhookAck { received: true }).unwrap();
        assert_eq!(json, r#"{"received":true}"#);
    }
}
