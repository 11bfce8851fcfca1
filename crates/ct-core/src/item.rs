//! Logged items and their kind.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for caller-supplied item data.
///
/// Raised at the construction boundary; the tracker itself assumes
/// already-validated input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Whether an item is a meal or a workout.
///
/// The two kinds share the [`Item`] shape; the kind decides which collection
/// holds the item and whether its calories count toward or against the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Meal,
    Workout,
}

impl ItemKind {
    /// String representation for database storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meal => "meal",
            Self::Workout => "workout",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = UnknownItemKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meal" => Ok(Self::Meal),
            "workout" => Ok(Self::Workout),
            _ => Err(UnknownItemKind(s.to_string())),
        }
    }
}

/// Error for item kind strings that are neither `meal` nor `workout`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown item kind: {0}")]
pub struct UnknownItemKind(pub String);

/// A single logged meal or workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, generated at creation. Sole key for removal.
    pub id: Uuid,
    /// Free-text label, non-empty.
    pub name: String,
    /// Calorie magnitude. The sign applied to the running total comes from
    /// which collection holds the item, not from this value.
    pub calories: i64,
    /// When the item was logged.
    pub logged_at: DateTime<Utc>,
}

impl Item {
    /// Creates an item with a freshly generated id.
    ///
    /// Rejects empty (or whitespace-only) names; calorie magnitude is taken
    /// as given, positivity is the caller's concern.
    pub fn new(name: impl Into<String>, calories: i64) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            calories,
            logged_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_generates_unique_ids() {
        let a = Item::new("Eggs", 300).unwrap();
        let b = Item::new("Eggs", 300).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn new_item_rejects_empty_name() {
        assert_eq!(
            Item::new("", 100),
            Err(ValidationError::Empty { field: "name" })
        );
        assert_eq!(
            Item::new("   ", 100),
            Err(ValidationError::Empty { field: "name" })
        );
    }

    #[test]
    fn new_item_accepts_any_calorie_magnitude() {
        assert!(Item::new("Nap", 0).is_ok());
        assert!(Item::new("Correction", -50).is_ok());
    }

    #[test]
    fn item_kind_round_trips_through_storage_string() {
        for kind in [ItemKind::Meal, ItemKind::Workout] {
            assert_eq!(kind.as_str().parse::<ItemKind>().unwrap(), kind);
        }
    }

    #[test]
    fn item_kind_rejects_unknown_string() {
        let err = "snack".parse::<ItemKind>().unwrap_err();
        assert_eq!(err, UnknownItemKind("snack".to_string()));
    }
}
