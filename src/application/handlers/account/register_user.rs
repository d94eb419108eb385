//! RegisterUserHandler - creates the user record at sign-up.

use std::sync::Arc;

use crate::domain::account::UserRecord;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::UserRecordRepository;

/// Command to register a user record.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub user_id: UserId,
    pub email: String,
}

/// Handler creating records with inactive status and default targets.
///
/// Idempotent: registering an existing user returns the stored record
/// untouched, since the auth provider may replay sign-in callbacks.
pub struct RegisterUserHandler {
    users: Arc<dyn UserRecordRepository>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRecordRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<UserRecord, DomainError> {
        if let Some(existing) = self.users.find_by_id(&cmd.user_id).await? {
            return Ok(existing);
        }

        let record = UserRecord::register(cmd.user_id.clone(), cmd.email, Timestamp::now());

        match self.users.create(&record).await {
            Ok(()) => {
                tracing::info!(user_id = %cmd.user_id, "User record created");
                Ok(record)
            }
            // Lost a concurrent-registration race; the stored record wins
            Err(e) if e.code == ErrorCode::AlreadyExists => self
                .users
                .find_by_id(&cmd.user_id)
                .await?
                .ok_or(e),
            Err(e) => Err(e),
        }
    }
}
