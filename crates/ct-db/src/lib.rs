//! Storage layer and tracker for the calorie tracker.
//!
//! Provides persistence for the daily limit, the running total, and the
//! meal/workout collections using `rusqlite`, plus the [`Tracker`] that owns
//! the authoritative in-memory mirror of that state.
//!
//! # Thread Safety
//!
//! The [`Store`] type wraps a `rusqlite::Connection`, which is `Send` but not
//! `Sync`. A `Store` (and therefore a `Tracker`) can be moved between threads
//! but cannot be shared across threads without external synchronization. The
//! design assumes exactly one writer per database; a multi-session setup
//! would introduce locking at the store boundary.
//!
//! # Schema
//!
//! Scalar settings (limit, total) live in a `settings` key-value table as
//! TEXT and are parsed on read, falling back to defaults when absent or
//! unparseable. Items live in a single `items` table discriminated by a
//! `kind` column (`meal` or `workout`); insertion order is recovered from
//! the rowid, so display order matches logging order.

mod store;
mod tracker;

pub use store::{KEY_CALORIE_LIMIT, KEY_TOTAL_CALORIES, Store, StoreError};
pub use tracker::Tracker;
