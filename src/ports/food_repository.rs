//! FoodRepository port - persistence for food definitions.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FoodId, UserId};
use crate::domain::nutrition::Food;

/// Port for the per-user food list.
#[async_trait]
pub trait FoodRepository: Send + Sync {
    /// Insert a new food.
    async fn create(&self, food: &Food) -> Result<(), DomainError>;

    /// List a user's foods, newest first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Food>, DomainError>;

    /// Load one food by id.
    async fn find_by_id(&self, id: &FoodId) -> Result<Option<Food>, DomainError>;

    /// Delete a food owned by the given user.
    ///
    /// Fails with `FoodNotFound` if the id does not exist for that
    /// user; ownership is part of the key so users cannot delete each
    /// other's foods.
    async fn delete(&self, user_id: &UserId, id: &FoodId) -> Result<(), DomainError>;
}
