//! DeleteFoodHandler - removes a food from the user's list.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, FoodId, UserId};
use crate::ports::FoodRepository;

/// Command to delete a food.
#[derive(Debug, Clone)]
pub struct DeleteFoodCommand {
    pub user_id: UserId,
    pub food_id: FoodId,
}

/// Handler deleting foods with ownership enforced by the repository.
pub struct DeleteFoodHandler {
    foods: Arc<dyn FoodRepository>,
}

impl DeleteFoodHandler {
    pub fn new(foods: Arc<dyn FoodRepository>) -> Self {
        Self { foods }
    }

    pub async fn handle(&self, cmd: DeleteFoodCommand) -> Result<(), DomainError> {
        self.foods.delete(&cmd.user_id, &cmd.food_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryFoodRepository;
    use crate::domain::foundation::{ErrorCode, Timestamp};
    use crate::domain::nutrition::{Food, Macros};

    #[tokio::test]
    async fn delete_removes_food() {
        let foods = Arc::new(InMemoryFoodRepository::new());
        let food = Food::create(
            UserId::new("u1").unwrap(),
            "Rice",
            "100 g",
            Macros::zero(),
            Timestamp::now(),
        )
        .unwrap();
        foods.create(&food).await.unwrap();

        let handler = DeleteFoodHandler::new(foods.clone());
        handler
            .handle(DeleteFoodCommand {
                user_id: UserId::new("u1").unwrap(),
                food_id: food.id,
            })
            .await
            .unwrap();

        assert!(foods.find_by_id(&food.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_unknown_food_is_not_found() {
        let handler = DeleteFoodHandler::new(Arc::new(InMemoryFoodRepository::new()));

        let err = handler
            .handle(DeleteFoodCommand {
                user_id: UserId::new("u1").unwrap(),
                food_id: FoodId::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::FoodNotFound);
    }
}
