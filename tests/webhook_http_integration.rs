//! Integration tests for the Stripe webhook endpoint.
//!
//! Drives the full axum router with in-memory adapters and real
//! HMAC-SHA256 signatures, covering the concrete scenarios the
//! subscription lifecycle must satisfy:
//!
//! 1. Signed checkout completion activates the user and stores the
//!    customer id, idempotently across redelivery
//! 2. An invalid signature never causes a record mutation
//! 3. Subscription deletion for a mapped customer deactivates
//! 4. An event with no resolvable user fails 4xx with no writes

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;
use tower::ServiceExt;

use macrolog::adapters::http::{api_router, AppState, BillingUrls};
use macrolog::adapters::memory::{
    InMemoryFoodRepository, InMemoryMealRepository, InMemoryUserRecordRepository,
    InMemoryWebhookEventRepository,
};
use macrolog::adapters::stripe::MockPaymentProvider;
use macrolog::domain::account::{SubscriptionStatus, UserRecord};
use macrolog::domain::billing::{CooldownGate, WebhookVerifier};
use macrolog::domain::foundation::{Timestamp, UserId};
use macrolog::ports::UserRecordRepository;

const WEBHOOK_SECRET: &str = "whsec_integration_test";

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: axum::Router,
    users: Arc<InMemoryUserRecordRepository>,
}

async fn test_app() -> TestApp {
    let users = Arc::new(InMemoryUserRecordRepository::new());
    users
        .seed(UserRecord::register(
            UserId::new("u1").unwrap(),
            "u1@example.com",
            Timestamp::from_unix_secs(1_700_000_000),
        ))
        .await;

    let state = AppState {
        users: users.clone(),
        webhook_events: Arc::new(InMemoryWebhookEventRepository::new()),
        payment: Arc::new(MockPaymentProvider::new()),
        foods: Arc::new(InMemoryFoodRepository::new()),
        meals: Arc::new(InMemoryMealRepository::new()),
        verifier: Arc::new(WebhookVerifier::new(WEBHOOK_SECRET)),
        cooldown: Arc::new(CooldownGate::with_default_window()),
        billing_urls: BillingUrls::from_app_url("http://localhost:3000"),
    };

    TestApp {
        router: api_router(state),
        users,
    }
}

fn sign(payload: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp();
    let signed_payload = format!("{}.{}", timestamp, payload);
    let mut mac = Hmac::<Sha256>::new_from_slice(WEBHOOK_SECRET.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(signed_payload.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());
    format!("t={},v1={}", timestamp, signature)
}

async fn deliver(app: &TestApp, event: &Value, signature: Option<String>) -> (StatusCode, Value) {
    let payload = serde_json::to_string(event).unwrap();
    let signature = signature.unwrap_or_else(|| sign(&payload));

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/webhooks/stripe")
                .header("Stripe-Signature", signature)
                .header("Content-Type", "application/json")
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn stored_record(app: &TestApp, id: &str) -> UserRecord {
    app.users
        .find_by_id(&UserId::new(id).unwrap())
        .await
        .unwrap()
        .unwrap()
}

fn checkout_event(event_id: &str, user_id: &str, customer_id: &str) -> Value {
    json!({
        "id": event_id,
        "type": "checkout.session.completed",
        "created": chrono::Utc::now().timestamp(),
        "livemode": false,
        "data": {
            "object": {
                "id": "cs_1",
                "customer": customer_id,
                "customer_email": "u1@example.com",
                "metadata": { "user_id": user_id }
            }
        }
    })
}

fn subscription_deleted_event(event_id: &str, customer_id: &str) -> Value {
    json!({
        "id": event_id,
        "type": "customer.subscription.deleted",
        "created": chrono::Utc::now().timestamp(),
        "livemode": false,
        "data": {
            "object": {
                "id": "sub_1",
                "customer": customer_id,
                "status": "canceled",
                "metadata": {}
            }
        }
    })
}

// =============================================================================
// Checkout Completion
// =============================================================================

#[tokio::test]
async fn checkout_completed_activates_user_and_stores_customer_id() {
    let app = test_app().await;

    let (status, body) = deliver(&app, &checkout_event("evt_1", "u1", "cus_1"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["received"], true);

    let record = stored_record(&app, "u1").await;
    assert_eq!(record.subscription_status, SubscriptionStatus::Active);
    assert_eq!(record.stripe_customer_id.as_deref(), Some("cus_1"));
}

#[tokio::test]
async fn duplicate_checkout_delivery_is_idempotent() {
    let app = test_app().await;
    let event = checkout_event("evt_dup", "u1", "cus_1");

    let (first_status, _) = deliver(&app, &event, None).await;
    let after_first = stored_record(&app, "u1").await;

    let (second_status, body) = deliver(&app, &event, None).await;
    let after_second = stored_record(&app, "u1").await;

    // Both deliveries acknowledged; the record is unchanged
    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(body["received"], true);
    assert_eq!(
        after_first.subscription_status,
        after_second.subscription_status
    );
    assert_eq!(after_first.updated_at, after_second.updated_at);
}

// =============================================================================
// Signature Verification
// =============================================================================

#[tokio::test]
async fn invalid_signature_is_rejected_without_mutation() {
    let app = test_app().await;
    let event = checkout_event("evt_bad_sig", "u1", "cus_1");
    let forged = format!("t={},v1={}", chrono::Utc::now().timestamp(), "a".repeat(64));

    let (status, _) = deliver(&app, &event, Some(forged)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let record = stored_record(&app, "u1").await;
    assert_eq!(record.subscription_status, SubscriptionStatus::Inactive);
    assert!(record.stripe_customer_id.is_none());
}

#[tokio::test]
async fn missing_signature_header_is_rejected() {
    let app = test_app().await;
    let payload = serde_json::to_string(&checkout_event("evt_no_sig", "u1", "cus_1")).unwrap();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/webhooks/stripe")
                .header("Content-Type", "application/json")
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let record = stored_record(&app, "u1").await;
    assert_eq!(record.subscription_status, SubscriptionStatus::Inactive);
}

#[tokio::test]
async fn stale_timestamp_is_rejected() {
    let app = test_app().await;
    let event = checkout_event("evt_stale", "u1", "cus_1");
    let payload = serde_json::to_string(&event).unwrap();

    // Sign with a timestamp ten minutes in the past
    let timestamp = chrono::Utc::now().timestamp() - 600;
    let signed_payload = format!("{}.{}", timestamp, payload);
    let mut mac = Hmac::<Sha256>::new_from_slice(WEBHOOK_SECRET.as_bytes()).unwrap();
    mac.update(signed_payload.as_bytes());
    let signature = format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()));

    let (status, _) = deliver(&app, &event, Some(signature)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let record = stored_record(&app, "u1").await;
    assert_eq!(record.subscription_status, SubscriptionStatus::Inactive);
}

// =============================================================================
// Subscription Deletion
// =============================================================================

#[tokio::test]
async fn subscription_deleted_deactivates_mapped_user() {
    let app = test_app().await;
    deliver(&app, &checkout_event("evt_setup", "u1", "cus_1"), None).await;

    let (status, _) = deliver(&app, &subscription_deleted_event("evt_del", "cus_1"), None).await;

    assert_eq!(status, StatusCode::OK);
    let record = stored_record(&app, "u1").await;
    assert_eq!(record.subscription_status, SubscriptionStatus::Inactive);
}

// =============================================================================
// Unresolvable Events
// =============================================================================

#[tokio::test]
async fn event_without_resolvable_user_fails_4xx_with_no_writes() {
    let app = test_app().await;

    let event = json!({
        "id": "evt_orphan",
        "type": "checkout.session.completed",
        "created": chrono::Utc::now().timestamp(),
        "livemode": false,
        "data": {
            "object": { "id": "cs_1", "customer": "cus_9" }
        }
    });

    let (status, _) = deliver(&app, &event, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let record = stored_record(&app, "u1").await;
    assert_eq!(record.subscription_status, SubscriptionStatus::Inactive);
    assert!(record.stripe_customer_id.is_none());
}

#[tokio::test]
async fn unknown_event_kind_is_acknowledged_with_200() {
    let app = test_app().await;

    let event = json!({
        "id": "evt_unknown",
        "type": "invoice.payment_succeeded",
        "created": chrono::Utc::now().timestamp(),
        "livemode": false,
        "data": { "object": {} }
    });

    let (status, body) = deliver(&app, &event, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["received"], true);
}
