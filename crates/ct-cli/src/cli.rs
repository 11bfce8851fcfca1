//! Command-line argument definitions.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use ct_core::ItemKind;

/// Daily calorie tracker.
///
/// Logs meals and workouts against a configurable daily limit and keeps the
/// running totals across sessions.
#[derive(Debug, Parser)]
#[command(name = "ct", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log a meal or workout.
    Add {
        #[command(subcommand)]
        item: AddItem,
    },

    /// Remove a logged item by id.
    Remove {
        #[command(subcommand)]
        item: RemoveItem,
    },

    /// Set the daily calorie limit.
    SetLimit {
        /// The new daily limit in calories.
        limit: i64,
    },

    /// Clear the day's entries and running total. The limit is kept.
    Reset,

    /// Show current totals against the daily limit.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List logged items.
    Items {
        /// Only show one kind (meal or workout).
        #[arg(long, value_parser = ItemKind::from_str)]
        kind: Option<ItemKind>,

        /// Only show items whose name contains this text (case-insensitive).
        #[arg(long)]
        filter: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Item kinds that can be logged.
#[derive(Debug, Subcommand)]
pub enum AddItem {
    /// Log a meal; its calories count toward the total.
    Meal {
        /// Name of the meal.
        name: String,
        /// Calorie count.
        calories: i64,
    },

    /// Log a workout; its calories count against the total.
    Workout {
        /// Name of the workout.
        name: String,
        /// Calories burned.
        calories: i64,
    },
}

/// Item kinds that can be removed.
#[derive(Debug, Subcommand)]
pub enum RemoveItem {
    /// Remove a meal by id.
    Meal {
        /// The item id shown by `ct items`.
        id: Uuid,
    },

    /// Remove a workout by id.
    Workout {
        /// The item id shown by `ct items`.
        id: Uuid,
    },
}
