//! UpdateTargetsHandler - replaces a user's daily macro goals.

use std::sync::Arc;

use crate::domain::account::{MacroTargets, UserRecord};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::UserRecordRepository;

/// Command to replace a user's targets.
#[derive(Debug, Clone)]
pub struct UpdateTargetsCommand {
    pub user_id: UserId,
    pub targets: MacroTargets,
}

/// Handler writing new daily macro targets.
pub struct UpdateTargetsHandler {
    users: Arc<dyn UserRecordRepository>,
}

impl UpdateTargetsHandler {
    pub fn new(users: Arc<dyn UserRecordRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: UpdateTargetsCommand) -> Result<UserRecord, DomainError> {
        let mut record = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "User record not found"))?;

        record.set_targets(cmd.targets, Timestamp::now());
        self.users.update(&record).await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRecordRepository;

    #[tokio::test]
    async fn update_replaces_targets() {
        let users = Arc::new(InMemoryUserRecordRepository::new());
        users
            .seed(UserRecord::register(
                UserId::new("u1").unwrap(),
                "u1@example.com",
                Timestamp::now(),
            ))
            .await;
        let handler = UpdateTargetsHandler::new(users.clone());

        let targets = MacroTargets::new(1800, 150, 180, 60).unwrap();
        let record = handler
            .handle(UpdateTargetsCommand {
                user_id: UserId::new("u1").unwrap(),
                targets,
            })
            .await
            .unwrap();

        assert_eq!(record.targets, targets);

        let stored = users
            .find_by_id(&UserId::new("u1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.targets, targets);
    }

    #[tokio::test]
    async fn update_requires_existing_record() {
        let handler = UpdateTargetsHandler::new(Arc::new(InMemoryUserRecordRepository::new()));

        let err = handler
            .handle(UpdateTargetsCommand {
                user_id: UserId::new("ghost").unwrap(),
                targets: MacroTargets::default(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::UserNotFound);
    }
}
