//! Core domain logic for the calorie tracker.
//!
//! This crate contains the fundamental types shared by the storage and CLI
//! layers:
//! - [`Item`]: a single logged meal or workout
//! - [`ItemKind`]: which collection an item belongs to and which sign applies
//! - [`Summary`]: the derived figures (consumed, burned, remaining, progress)

pub mod item;
pub mod summary;

pub use item::{Item, ItemKind, UnknownItemKind, ValidationError};
pub use summary::Summary;

/// Daily calorie limit used when no limit has been persisted.
pub const DEFAULT_CALORIE_LIMIT: i64 = 2000;
