//! ListFoodsHandler - reads the user's food list.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::nutrition::Food;
use crate::ports::FoodRepository;

/// Query for a user's foods.
#[derive(Debug, Clone)]
pub struct ListFoodsQuery {
    pub user_id: UserId,
}

/// Handler listing foods, newest first.
pub struct ListFoodsHandler {
    foods: Arc<dyn FoodRepository>,
}

impl ListFoodsHandler {
    pub fn new(foods: Arc<dyn FoodRepository>) -> Self {
        Self { foods }
    }

    pub async fn handle(&self, query: ListFoodsQuery) -> Result<Vec<Food>, DomainError> {
        self.foods.list_by_user(&query.user_id).await
    }
}
