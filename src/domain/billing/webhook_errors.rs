//! Webhook error types for Stripe webhook handling.
//!
//! Defines all error conditions that can occur during webhook
//! processing, with HTTP status code mapping and retryability
//! semantics. Status codes drive Stripe's redelivery behavior: 2xx
//! acknowledges, 4xx is permanent, 5xx is retried.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Errors that occur during webhook processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Webhook signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Webhook timestamp is outside the acceptable window (5 minutes).
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Event timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Failed to parse webhook payload or signature header.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// No user id could be resolved from the event.
    #[error("Missing correlation id: {0}")]
    MissingCorrelation(&'static str),

    /// Required field missing from webhook payload.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Referenced user record could not be found.
    #[error("User record not found")]
    UserNotFound,

    /// Event was intentionally ignored (not an error condition).
    #[error("Event ignored: {0}")]
    Ignored(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),
}

impl WebhookError {
    /// Returns true if Stripe should retry delivering this webhook.
    ///
    /// Retryable errors indicate temporary failures that may succeed
    /// on a later delivery (store outages, eventual consistency
    /// between sign-up and the first webhook).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WebhookError::Database(_) | WebhookError::UserNotFound
        )
    }

    /// Maps the error to an appropriate HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Verification and data-shape failures are permanent
            WebhookError::InvalidSignature
            | WebhookError::InvalidTimestamp
            | WebhookError::ParseError(_)
            | WebhookError::MissingCorrelation(_)
            | WebhookError::MissingField(_) => StatusCode::BAD_REQUEST,

            // Stale timestamp is an auth-class rejection
            WebhookError::TimestampOutOfRange => StatusCode::UNAUTHORIZED,

            // Ignored events are acknowledged as success
            WebhookError::Ignored(_) => StatusCode::OK,

            // Server errors - Stripe will redeliver
            WebhookError::UserNotFound | WebhookError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Repository failures surface as retryable webhook errors.
impl From<DomainError> for WebhookError {
    fn from(err: DomainError) -> Self {
        WebhookError::Database(err.to_string())
    }
}
