//! HTTP DTOs for account endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::account::{MacroTargets, SubscriptionStatus, UserRecord};

/// Request to register a user record.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub user_id: String,
    pub email: String,
}

/// Request to replace daily macro targets.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetsRequest {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

/// User record view for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub user_id: String,
    pub email: String,
    pub subscription_status: SubscriptionStatus,
    pub stripe_customer_id: Option<String>,
    pub targets: MacroTargets,
    /// ISO 8601 creation time.
    pub created_at: String,
    /// ISO 8601 last-write time.
    pub updated_at: String,
}

impl From<UserRecord> for AccountResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            user_id: record.user_id.to_string(),
            email: record.email,
            subscription_status: record.subscription_status,
            stripe_customer_id: record.stripe_customer_id,
            targets: record.targets,
            created_at: record.created_at.as_datetime().to_rfc3339(),
            updated_at: record.updated_at.as_datetime().to_rfc3339(),
        }
    }
}
