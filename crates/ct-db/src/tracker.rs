//! The tracker: authoritative owner of the aggregate state.

use uuid::Uuid;

use ct_core::{Item, Summary};

use crate::store::{Store, StoreError};

/// Single authoritative owner of the tracked aggregate.
///
/// Holds the in-memory mirror of the limit, the running total, and the two
/// item collections, and writes every mutation through to the [`Store`]
/// before returning. The total invariant holds in every reachable state:
/// `total == sum(meal.calories) - sum(workout.calories)`.
///
/// Memory is mutated before the write-through, so a [`StoreError`] from a
/// mutation means the change is logically applied but persistence is
/// uncertain; callers may retry the persistence step, not the mutation.
pub struct Tracker {
    store: Store,
    limit: i64,
    total: i64,
    meals: Vec<Item>,
    workouts: Vec<Item>,
}

impl Tracker {
    /// Loads tracker state from the store.
    ///
    /// An empty store yields the defaults: limit 2000, total 0, no items.
    pub fn load(store: Store) -> Result<Self, StoreError> {
        let limit = store.calorie_limit()?;
        let total = store.total_calories()?;
        let meals = store.meals()?;
        let workouts = store.workouts()?;
        tracing::debug!(
            limit,
            total,
            meals = meals.len(),
            workouts = workouts.len(),
            "loaded tracker state"
        );
        Ok(Self {
            store,
            limit,
            total,
            meals,
            workouts,
        })
    }

    /// Logs a meal and writes the new total and item through to the store.
    pub fn add_meal(&mut self, meal: Item) -> Result<(), StoreError> {
        self.total += meal.calories;
        self.meals.push(meal);
        // Write-through happens after the memory mutation; on failure the
        // change is applied in memory but persistence is uncertain.
        if let Some(meal) = self.meals.last() {
            self.store.update_total_calories(self.total)?;
            self.store.save_meal(meal)?;
        }
        Ok(())
    }

    /// Logs a workout; its calories count against the total.
    pub fn add_workout(&mut self, workout: Item) -> Result<(), StoreError> {
        self.total -= workout.calories;
        self.workouts.push(workout);
        if let Some(workout) = self.workouts.last() {
            self.store.update_total_calories(self.total)?;
            self.store.save_workout(workout)?;
        }
        Ok(())
    }

    /// Removes the meal with the given id from memory and store.
    ///
    /// An absent id is a no-op, not an error (idempotent delete). Returns
    /// whether a meal was removed.
    pub fn remove_meal(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let Some(index) = self.meals.iter().position(|meal| meal.id == id) else {
            return Ok(false);
        };
        let meal = self.meals.remove(index);
        self.total -= meal.calories;
        self.store.update_total_calories(self.total)?;
        self.store.remove_meal(id)?;
        Ok(true)
    }

    /// Removes the workout with the given id; its calories return to the
    /// total. Absent id is a no-op.
    pub fn remove_workout(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let Some(index) = self.workouts.iter().position(|workout| workout.id == id) else {
            return Ok(false);
        };
        let workout = self.workouts.remove(index);
        self.total += workout.calories;
        self.store.update_total_calories(self.total)?;
        self.store.remove_workout(id)?;
        Ok(true)
    }

    /// Overwrites the daily limit in memory and store.
    ///
    /// No validation at this layer: zero or negative limits are degenerate
    /// but accepted; sanity checks belong to the input boundary.
    pub fn set_limit(&mut self, value: i64) -> Result<(), StoreError> {
        self.limit = value;
        self.store.set_calorie_limit(value)
    }

    /// Returns the tracker to its default state: total 0, no items.
    ///
    /// The limit survives a reset, in memory and in the store, so the user's
    /// chosen target is not lost with the day's entries.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.total = 0;
        self.meals.clear();
        self.workouts.clear();
        self.store.reset()
    }

    /// Current daily limit.
    pub const fn limit(&self) -> i64 {
        self.limit
    }

    /// Net calorie balance: meals minus workouts.
    pub const fn total(&self) -> i64 {
        self.total
    }

    /// All logged meals in display order.
    pub fn meals(&self) -> &[Item] {
        &self.meals
    }

    /// All logged workouts in display order.
    pub fn workouts(&self) -> &[Item] {
        &self.workouts
    }

    /// Snapshot of the derived figures for display.
    pub fn summary(&self) -> Summary {
        Summary {
            limit: self.limit,
            total: self.total,
            consumed: self.meals.iter().map(|meal| meal.calories).sum(),
            burned: self.workouts.iter().map(|workout| workout.calories).sum(),
        }
    }
}
