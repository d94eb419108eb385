//! In-memory implementations of FoodRepository and MealRepository.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, FoodId, UserId};
use crate::domain::nutrition::{Food, MealEntry};
use crate::ports::{FoodRepository, MealRepository};

/// In-memory food list.
#[derive(Default)]
pub struct InMemoryFoodRepository {
    foods: RwLock<Vec<Food>>,
}

impl InMemoryFoodRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FoodRepository for InMemoryFoodRepository {
    async fn create(&self, food: &Food) -> Result<(), DomainError> {
        self.foods.write().await.push(food.clone());
        Ok(())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Food>, DomainError> {
        let foods = self.foods.read().await;
        let mut result: Vec<Food> = foods
            .iter()
            .filter(|f| &f.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn find_by_id(&self, id: &FoodId) -> Result<Option<Food>, DomainError> {
        Ok(self.foods.read().await.iter().find(|f| &f.id == id).cloned())
    }

    async fn delete(&self, user_id: &UserId, id: &FoodId) -> Result<(), DomainError> {
        let mut foods = self.foods.write().await;
        let before = foods.len();
        foods.retain(|f| !(&f.id == id && &f.user_id == user_id));
        if foods.len() == before {
            return Err(DomainError::new(ErrorCode::FoodNotFound, "Food not found"));
        }
        Ok(())
    }
}

/// In-memory meal log.
#[derive(Default)]
pub struct InMemoryMealRepository {
    entries: RwLock<Vec<MealEntry>>,
}

impl InMemoryMealRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MealRepository for InMemoryMealRepository {
    async fn create(&self, entry: &MealEntry) -> Result<(), DomainError> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn list_for_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Vec<MealEntry>, DomainError> {
        let entries = self.entries.read().await;
        let mut result: Vec<MealEntry> = entries
            .iter()
            .filter(|e| &e.user_id == user_id && e.date == date)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::nutrition::Macros;

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    fn food(name: &str, created: Timestamp) -> Food {
        Food::create(user(), name, "100 g", Macros::zero(), created).unwrap()
    }

    #[tokio::test]
    async fn list_by_user_returns_newest_first() {
        let repo = InMemoryFoodRepository::new();
        let t0 = Timestamp::from_unix_secs(1000);
        repo.create(&food("older", t0)).await.unwrap();
        repo.create(&food("newer", t0.plus_secs(60))).await.unwrap();

        let foods = repo.list_by_user(&user()).await.unwrap();

        assert_eq!(foods[0].name, "newer");
        assert_eq!(foods[1].name, "older");
    }

    #[tokio::test]
    async fn list_by_user_excludes_other_users() {
        let repo = InMemoryFoodRepository::new();
        repo.create(&food("mine", Timestamp::now())).await.unwrap();

        let other = UserId::new("u2").unwrap();
        assert!(repo.list_by_user(&other).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_requires_matching_owner() {
        let repo = InMemoryFoodRepository::new();
        let f = food("mine", Timestamp::now());
        repo.create(&f).await.unwrap();

        let other = UserId::new("u2").unwrap();
        assert!(repo.delete(&other, &f.id).await.is_err());
        assert!(repo.delete(&user(), &f.id).await.is_ok());
    }

    #[tokio::test]
    async fn meals_are_filtered_by_date() {
        let repo = InMemoryMealRepository::new();
        // 2024-01-15 and 2024-01-16
        let day1 = Timestamp::from_unix_secs(1_705_276_800);
        let day2 = Timestamp::from_unix_secs(1_705_363_200);

        let e1 = MealEntry::log(user(), "breakfast", Macros::zero(), None, day1).unwrap();
        let e2 = MealEntry::log(user(), "lunch", Macros::zero(), None, day2).unwrap();
        repo.create(&e1).await.unwrap();
        repo.create(&e2).await.unwrap();

        let day1_entries = repo.list_for_date(&user(), day1.date()).await.unwrap();
        assert_eq!(day1_entries.len(), 1);
        assert_eq!(day1_entries[0].name, "breakfast");
    }
}
