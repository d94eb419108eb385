//! Shared HTTP state, authentication extractor, and error mapping.

use std::sync::Arc;

use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::handlers::account::{
    GetAccountHandler, RegisterUserHandler, UpdateTargetsHandler,
};
use crate::application::handlers::billing::{
    CreateCheckoutHandler, CreatePortalHandler, ProcessWebhookHandler,
    ReconcileSubscriptionHandler,
};
use crate::application::handlers::nutrition::{
    AddFoodHandler, DailySummaryHandler, DeleteFoodHandler, ListFoodsHandler, LogMealHandler,
};
use crate::domain::billing::{CooldownGate, WebhookVerifier};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{
    FoodRepository, MealRepository, PaymentProvider, UserRecordRepository,
    WebhookEventRepository,
};

/// Redirect targets derived from the configured app URL.
#[derive(Debug, Clone)]
pub struct BillingUrls {
    pub checkout_success: String,
    pub checkout_cancel: String,
    pub portal_return: String,
}

impl BillingUrls {
    /// Builds the standard redirect set from the app's base URL.
    pub fn from_app_url(app_url: &str) -> Self {
        let base = app_url.trim_end_matches('/');
        Self {
            checkout_success: format!("{base}/dashboard?success=true"),
            checkout_cancel: format!("{base}/subscribe?canceled=true"),
            portal_return: format!("{base}/dashboard"),
        }
    }
}

/// Shared application state containing all dependencies.
///
/// Cloned per request; everything inside is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRecordRepository>,
    pub webhook_events: Arc<dyn WebhookEventRepository>,
    pub payment: Arc<dyn PaymentProvider>,
    pub foods: Arc<dyn FoodRepository>,
    pub meals: Arc<dyn MealRepository>,
    pub verifier: Arc<WebhookVerifier>,
    pub cooldown: Arc<CooldownGate>,
    pub billing_urls: BillingUrls,
}

impl AppState {
    pub fn register_user_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(self.users.clone())
    }

    pub fn get_account_handler(&self) -> GetAccountHandler {
        GetAccountHandler::new(self.users.clone())
    }

    pub fn update_targets_handler(&self) -> UpdateTargetsHandler {
        UpdateTargetsHandler::new(self.users.clone())
    }

    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(
            self.users.clone(),
            self.payment.clone(),
            self.billing_urls.checkout_success.clone(),
            self.billing_urls.checkout_cancel.clone(),
        )
    }

    pub fn create_portal_handler(&self) -> CreatePortalHandler {
        CreatePortalHandler::new(
            self.users.clone(),
            self.payment.clone(),
            self.billing_urls.portal_return.clone(),
        )
    }

    pub fn process_webhook_handler(&self) -> ProcessWebhookHandler {
        ProcessWebhookHandler::new(
            self.verifier.clone(),
            self.webhook_events.clone(),
            self.users.clone(),
        )
    }

    pub fn reconcile_handler(&self) -> ReconcileSubscriptionHandler {
        ReconcileSubscriptionHandler::new(
            self.users.clone(),
            self.payment.clone(),
            self.cooldown.clone(),
        )
    }

    pub fn add_food_handler(&self) -> AddFoodHandler {
        AddFoodHandler::new(self.foods.clone())
    }

    pub fn list_foods_handler(&self) -> ListFoodsHandler {
        ListFoodsHandler::new(self.foods.clone())
    }

    pub fn delete_food_handler(&self) -> DeleteFoodHandler {
        DeleteFoodHandler::new(self.foods.clone())
    }

    pub fn log_meal_handler(&self) -> LogMealHandler {
        LogMealHandler::new(self.meals.clone(), self.foods.clone())
    }

    pub fn daily_summary_handler(&self) -> DailySummaryHandler {
        DailySummaryHandler::new(self.users.clone(), self.meals.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Authentication
// ════════════════════════════════════════════════════════════════════════════════

/// Authenticated user context extracted from the request.
///
/// Identity is established by the hosted auth provider on the front
/// end; this backend trusts the `X-User-Id` header behind it. A JWT
/// validator would slot in here without touching the handlers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Rejection type for AuthenticatedUser extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user_id = parts
                .headers
                .get("X-User-Id")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| UserId::new(s).ok())
                .ok_or(AuthenticationRequired)?;

            Ok(AuthenticatedUser { user_id })
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// JSON error body: `{ "error": { "code", "message" } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error detail inside the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0.code {
            ErrorCode::UserNotFound
            | ErrorCode::FoodNotFound
            | ErrorCode::MealEntryNotFound => StatusCode::NOT_FOUND,

            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,

            ErrorCode::AlreadyExists | ErrorCode::StaleWrite => StatusCode::CONFLICT,

            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,

            // Transient upstream failures surface as 500 so callers
            // retry; no provider detail leaks to the client.
            ErrorCode::PaymentProviderError
            | ErrorCode::DatabaseError
            | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
            "Something went wrong, please try again".to_string()
        } else {
            self.0.message.clone()
        };

        let body = ErrorResponse::new(self.0.code.to_string(), message);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_urls_derive_from_app_url() {
        let urls = BillingUrls::from_app_url("https://app.example.com/");

        assert_eq!(
            urls.checkout_success,
            "https://app.example.com/dashboard?success=true"
        );
        assert_eq!(
            urls.checkout_cancel,
            "https://app.example.com/subscribe?canceled=true"
        );
        assert_eq!(urls.portal_return, "https://app.example.com/dashboard");
    }

    #[test]
    fn error_response_serializes_with_envelope() {
        let response = ErrorResponse::new("USER_NOT_FOUND", "User record not found");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["error"]["code"], "USER_NOT_FOUND");
        assert_eq!(json["error"]["message"], "User record not found");
    }
}
