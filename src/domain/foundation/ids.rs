//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a user account.
///
/// Opaque string assigned by the hosted auth provider; not a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a food definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodId(Uuid);

impl FoodId {
    /// Creates a new random FoodId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a FoodId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for FoodId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FoodId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a meal log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealEntryId(Uuid);

impl MealEntryId {
    /// Creates a new random MealEntryId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a MealEntryId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MealEntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MealEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MealEntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_accepts_non_empty_string() {
        let id = UserId::new("firebase-uid-abc123").unwrap();
        assert_eq!(id.as_str(), "firebase-uid-abc123");
    }

    #[test]
    fn user_id_rejects_empty_string() {
        assert!(UserId::new("").is_err());
    }

    #[test]
    fn user_id_displays_inner_value() {
        let id = UserId::new("u1").unwrap();
        assert_eq!(id.to_string(), "u1");
    }

    #[test]
    fn user_id_serializes_transparently() {
        let id = UserId::new("u1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"u1\"");
    }

    #[test]
    fn food_id_generates_unique_values() {
        assert_ne!(FoodId::new(), FoodId::new());
    }

    #[test]
    fn food_id_roundtrips_through_string() {
        let id = FoodId::new();
        let parsed: FoodId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn meal_entry_id_roundtrips_through_string() {
        let id = MealEntryId::new();
        let parsed: MealEntryId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
