//! AddFoodHandler - saves a food definition.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::nutrition::{Food, Macros};
use crate::ports::FoodRepository;

/// Command to add a food to the user's list.
#[derive(Debug, Clone)]
pub struct AddFoodCommand {
    pub user_id: UserId,
    pub name: String,
    pub serving: String,
    pub macros: Macros,
}

/// Handler creating food definitions.
pub struct AddFoodHandler {
    foods: Arc<dyn FoodRepository>,
}

impl AddFoodHandler {
    pub fn new(foods: Arc<dyn FoodRepository>) -> Self {
        Self { foods }
    }

    pub async fn handle(&self, cmd: AddFoodCommand) -> Result<Food, DomainError> {
        let food = Food::create(
            cmd.user_id,
            cmd.name,
            cmd.serving,
            cmd.macros,
            Timestamp::now(),
        )?;

        self.foods.create(&food).await?;
        Ok(food)
    }
}
