//! Calorie tracker CLI library.
//!
//! This crate provides the CLI interface for the calorie tracker: argument
//! parsing, configuration, and the presentation commands that sit in front
//! of the [`ct_db::Tracker`].

mod cli;
pub mod commands;
mod config;

pub use cli::{AddItem, Cli, Commands, RemoveItem};
pub use config::Config;
