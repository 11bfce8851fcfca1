//! Durable key-value store for tracker state.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;
use uuid::Uuid;

use ct_core::{DEFAULT_CALORIE_LIMIT, Item, ItemKind};

/// Settings key for the persisted daily limit.
pub const KEY_CALORIE_LIMIT: &str = "calorie_limit";
/// Settings key for the persisted running total.
pub const KEY_TOTAL_CALORIES: &str = "total_calories";

/// Storage errors.
///
/// Every failed write surfaces here; nothing is silently dropped. A caller
/// seeing this after a mutation should treat the change as "logically
/// applied, persistence uncertain".
#[derive(Debug, Error)]
pub enum StoreError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Database connection wrapper.
///
/// See the [module documentation](crate) for thread safety considerations.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens a store at the given path, creating it if necessary.
    ///
    /// The schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Opens an in-memory store.
    ///
    /// Useful for testing. The data is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Initializes the schema.
    ///
    /// This is idempotent - safe to call on an already-initialized store.
    fn init(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            -- Items table: both collections, discriminated by kind.
            -- logged_at: ISO 8601 format (e.g., '2024-01-15T10:30:00Z')
            -- Insertion order is recovered from the rowid.
            CREATE TABLE IF NOT EXISTS items (
                id TEXT PRIMARY KEY,
                kind TEXT NOT NULL,
                name TEXT NOT NULL,
                calories INTEGER NOT NULL,
                logged_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_items_kind ON items(kind);
            ",
        )?;
        Ok(())
    }

    /// Returns the persisted daily limit, or the default if absent.
    pub fn calorie_limit(&self) -> Result<i64, StoreError> {
        self.scalar(KEY_CALORIE_LIMIT, DEFAULT_CALORIE_LIMIT)
    }

    /// Overwrites the persisted daily limit.
    pub fn set_calorie_limit(&self, value: i64) -> Result<(), StoreError> {
        self.set_scalar(KEY_CALORIE_LIMIT, value)
    }

    /// Returns the persisted running total, or 0 if absent.
    pub fn total_calories(&self) -> Result<i64, StoreError> {
        self.scalar(KEY_TOTAL_CALORIES, 0)
    }

    /// Overwrites the persisted running total.
    pub fn update_total_calories(&self, value: i64) -> Result<(), StoreError> {
        self.set_scalar(KEY_TOTAL_CALORIES, value)
    }

    /// Lists persisted meals in insertion order.
    pub fn meals(&self) -> Result<Vec<Item>, StoreError> {
        self.items(ItemKind::Meal)
    }

    /// Appends a meal to the persisted collection.
    pub fn save_meal(&self, item: &Item) -> Result<(), StoreError> {
        self.save_item(ItemKind::Meal, item)
    }

    /// Removes the meal with the given id. No-op if absent.
    pub fn remove_meal(&self, id: Uuid) -> Result<(), StoreError> {
        self.remove_item(ItemKind::Meal, id)
    }

    /// Lists persisted workouts in insertion order.
    pub fn workouts(&self) -> Result<Vec<Item>, StoreError> {
        self.items(ItemKind::Workout)
    }

    /// Appends a workout to the persisted collection.
    pub fn save_workout(&self, item: &Item) -> Result<(), StoreError> {
        self.save_item(ItemKind::Workout, item)
    }

    /// Removes the workout with the given id. No-op if absent.
    pub fn remove_workout(&self, id: Uuid) -> Result<(), StoreError> {
        self.remove_item(ItemKind::Workout, id)
    }

    /// Clears the running total and both item collections in one transaction.
    ///
    /// The stored limit is preserved so a reload after a reset sees the same
    /// limit the live session does.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM items", [])?;
        tx.execute(
            "DELETE FROM settings WHERE key = ?",
            params![KEY_TOTAL_CALORIES],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Reads a scalar setting, falling back to the default when the key is
    /// absent or its value does not parse as an integer.
    fn scalar(&self, key: &str, default: i64) -> Result<i64, StoreError> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        match value {
            Some(raw) => match raw.parse::<i64>() {
                Ok(parsed) => Ok(parsed),
                Err(_) => {
                    tracing::warn!(key, raw, "unparseable setting, using default");
                    Ok(default)
                }
            },
            None => Ok(default),
        }
    }

    fn set_scalar(&self, key: &str, value: i64) -> Result<(), StoreError> {
        self.conn.execute(
            "
            INSERT INTO settings (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            ",
            params![key, value.to_string()],
        )?;
        Ok(())
    }

    /// Lists items of one kind in insertion order, skipping rows that no
    /// longer deserialize rather than failing the whole read.
    fn items(&self, kind: ItemKind) -> Result<Vec<Item>, StoreError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, name, calories, logged_at
            FROM items
            WHERE kind = ?
            ORDER BY rowid ASC
            ",
        )?;
        let rows = stmt.query_map(params![kind.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut items = Vec::new();
        for row in rows {
            let (id, name, calories, logged_at) = row?;
            match parse_item_row(&id, name, calories, &logged_at) {
                Some(item) => items.push(item),
                None => {
                    tracing::warn!(id, kind = %kind, "skipping undeserializable item row");
                }
            }
        }
        Ok(items)
    }

    fn save_item(&self, kind: ItemKind, item: &Item) -> Result<(), StoreError> {
        self.conn.execute(
            "
            INSERT INTO items (id, kind, name, calories, logged_at)
            VALUES (?, ?, ?, ?, ?)
            ",
            params![
                item.id.to_string(),
                kind.as_str(),
                item.name,
                item.calories,
                format_timestamp(item.logged_at),
            ],
        )?;
        Ok(())
    }

    fn remove_item(&self, kind: ItemKind, id: Uuid) -> Result<(), StoreError> {
        self.conn.execute(
            "DELETE FROM items WHERE id = ? AND kind = ?",
            params![id.to_string(), kind.as_str()],
        )?;
        Ok(())
    }
}

fn parse_item_row(id: &str, name: String, calories: i64, logged_at: &str) -> Option<Item> {
    let id = Uuid::parse_str(id).ok()?;
    let logged_at = DateTime::parse_from_rfc3339(logged_at)
        .ok()?
        .with_timezone(&Utc);
    Some(Item {
        id,
        name,
        calories,
        logged_at,
    })
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, calories: i64) -> Item {
        Item::new(name, calories).unwrap()
    }

    #[test]
    fn open_in_memory_store() {
        let store = Store::open_in_memory();
        assert!(store.is_ok());
    }

    #[test]
    fn empty_store_returns_defaults() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(store.calorie_limit().unwrap(), DEFAULT_CALORIE_LIMIT);
        assert_eq!(store.total_calories().unwrap(), 0);
        assert!(store.meals().unwrap().is_empty());
        assert!(store.workouts().unwrap().is_empty());
    }

    #[test]
    fn scalar_writes_overwrite() {
        let store = Store::open_in_memory().unwrap();
        store.set_calorie_limit(1800).unwrap();
        store.set_calorie_limit(1500).unwrap();
        assert_eq!(store.calorie_limit().unwrap(), 1500);

        store.update_total_calories(300).unwrap();
        store.update_total_calories(100).unwrap();
        assert_eq!(store.total_calories().unwrap(), 100);
    }

    #[test]
    fn unparseable_setting_falls_back_to_default() {
        let store = Store::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO settings (key, value) VALUES (?, ?)",
                params![KEY_CALORIE_LIMIT, "not-a-number"],
            )
            .unwrap();
        assert_eq!(store.calorie_limit().unwrap(), DEFAULT_CALORIE_LIMIT);
    }

    #[test]
    fn items_come_back_in_insertion_order() {
        let store = Store::open_in_memory().unwrap();
        let breakfast = item("Eggs", 300);
        let lunch = item("Salad", 250);
        store.save_meal(&breakfast).unwrap();
        store.save_meal(&lunch).unwrap();

        let meals = store.meals().unwrap();
        assert_eq!(meals, vec![breakfast, lunch]);
    }

    #[test]
    fn meals_and_workouts_are_separate_collections() {
        let store = Store::open_in_memory().unwrap();
        let eggs = item("Eggs", 300);
        let run = item("Run", 200);
        store.save_meal(&eggs).unwrap();
        store.save_workout(&run).unwrap();

        assert_eq!(store.meals().unwrap(), vec![eggs]);
        assert_eq!(store.workouts().unwrap(), vec![run]);
    }

    #[test]
    fn duplicate_item_id_fails_loudly() {
        let store = Store::open_in_memory().unwrap();
        let eggs = item("Eggs", 300);
        store.save_meal(&eggs).unwrap();
        assert!(matches!(
            store.save_meal(&eggs),
            Err(StoreError::Sqlite(_))
        ));
    }

    #[test]
    fn remove_is_a_no_op_for_absent_id() {
        let store = Store::open_in_memory().unwrap();
        store.remove_meal(Uuid::new_v4()).unwrap();
        store.remove_workout(Uuid::new_v4()).unwrap();
    }

    #[test]
    fn remove_only_touches_the_matching_collection() {
        let store = Store::open_in_memory().unwrap();
        let eggs = item("Eggs", 300);
        store.save_meal(&eggs).unwrap();

        // Same id, wrong collection: must not delete the meal.
        store.remove_workout(eggs.id).unwrap();
        assert_eq!(store.meals().unwrap().len(), 1);

        store.remove_meal(eggs.id).unwrap();
        assert!(store.meals().unwrap().is_empty());
    }

    #[test]
    fn reset_clears_total_and_items_but_keeps_limit() {
        let mut store = Store::open_in_memory().unwrap();
        store.set_calorie_limit(1500).unwrap();
        store.update_total_calories(300).unwrap();
        store.save_meal(&item("Eggs", 300)).unwrap();
        store.save_workout(&item("Run", 200)).unwrap();

        store.reset().unwrap();

        assert_eq!(store.total_calories().unwrap(), 0);
        assert!(store.meals().unwrap().is_empty());
        assert!(store.workouts().unwrap().is_empty());
        assert_eq!(store.calorie_limit().unwrap(), 1500);
    }

    #[test]
    fn undeserializable_item_rows_are_skipped() {
        let store = Store::open_in_memory().unwrap();
        let eggs = item("Eggs", 300);
        store.save_meal(&eggs).unwrap();
        store
            .conn
            .execute(
                "
                INSERT INTO items (id, kind, name, calories, logged_at)
                VALUES ('not-a-uuid', 'meal', 'Mystery', 100, 'not-a-date')
                ",
                [],
            )
            .unwrap();

        let meals = store.meals().unwrap();
        assert_eq!(meals, vec![eggs]);
    }

    #[test]
    fn store_survives_reopen_on_disk() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("ct.db");
        let eggs = item("Eggs", 300);
        {
            let store = Store::open(&path).unwrap();
            store.set_calorie_limit(1800).unwrap();
            store.save_meal(&eggs).unwrap();
        }

        let store = Store::open(&path).unwrap();
        assert_eq!(store.calorie_limit().unwrap(), 1800);
        assert_eq!(store.meals().unwrap(), vec![eggs]);
    }
}
