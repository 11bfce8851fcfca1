//! CLI subcommand implementations.

pub mod add;
pub mod items;
pub mod limit;
pub mod remove;
pub mod reset;
pub mod status;
