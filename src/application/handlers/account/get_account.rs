//! GetAccountHandler - reads the user record.

use std::sync::Arc;

use crate::domain::account::UserRecord;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::UserRecordRepository;

/// Query for one user's record.
#[derive(Debug, Clone)]
pub struct GetAccountQuery {
    pub user_id: UserId,
}

/// Handler returning the stored record.
pub struct GetAccountHandler {
    users: Arc<dyn UserRecordRepository>,
}

impl GetAccountHandler {
    pub fn new(users: Arc<dyn UserRecordRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetAccountQuery) -> Result<UserRecord, DomainError> {
        self.users
            .find_by_id(&query.user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "User record not found"))
    }
}
