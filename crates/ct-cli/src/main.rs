use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ct_core::ItemKind;
use ct_db::{Store, Tracker};

use ct_cli::commands::{add, items, limit, remove, reset, status};
use ct_cli::{AddItem, Cli, Commands, Config, RemoveItem};

/// Load config and bring up a tracker, ensuring the parent directory exists.
fn open_tracker(config_path: Option<&Path>) -> Result<Tracker> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let store = Store::open(&config.database_path).context("failed to open database")?;
    Tracker::load(store).context("failed to load tracker state")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Add { item }) => {
            let mut tracker = open_tracker(cli.config.as_deref())?;
            match item {
                AddItem::Meal { name, calories } => {
                    add::run(&mut stdout, &mut tracker, ItemKind::Meal, name, *calories)?;
                }
                AddItem::Workout { name, calories } => {
                    add::run(&mut stdout, &mut tracker, ItemKind::Workout, name, *calories)?;
                }
            }
        }
        Some(Commands::Remove { item }) => {
            let mut tracker = open_tracker(cli.config.as_deref())?;
            match item {
                RemoveItem::Meal { id } => {
                    remove::run(&mut stdout, &mut tracker, ItemKind::Meal, *id)?;
                }
                RemoveItem::Workout { id } => {
                    remove::run(&mut stdout, &mut tracker, ItemKind::Workout, *id)?;
                }
            }
        }
        Some(Commands::SetLimit { limit: value }) => {
            let mut tracker = open_tracker(cli.config.as_deref())?;
            limit::run(&mut stdout, &mut tracker, *value)?;
        }
        Some(Commands::Reset) => {
            let mut tracker = open_tracker(cli.config.as_deref())?;
            reset::run(&mut stdout, &mut tracker)?;
        }
        Some(Commands::Status { json }) => {
            let tracker = open_tracker(cli.config.as_deref())?;
            status::run(&mut stdout, &tracker, *json)?;
        }
        Some(Commands::Items { kind, filter, json }) => {
            let tracker = open_tracker(cli.config.as_deref())?;
            items::run(
                &mut stdout,
                &tracker,
                *kind,
                filter.as_deref(),
                *json,
            )?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
