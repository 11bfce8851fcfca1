//! Add command for logging meals and workouts.

use std::io::Write;

use anyhow::{Context, Result};

use ct_core::{Item, ItemKind};
use ct_db::Tracker;

pub fn run<W: Write>(
    writer: &mut W,
    tracker: &mut Tracker,
    kind: ItemKind,
    name: &str,
    calories: i64,
) -> Result<()> {
    let item = Item::new(name, calories).context("invalid item")?;
    let id = item.id;
    match kind {
        ItemKind::Meal => tracker.add_meal(item),
        ItemKind::Workout => tracker.add_workout(item),
    }
    .context("changes may not be saved")?;
    tracing::debug!(%id, %kind, calories, "item logged");

    let summary = tracker.summary();
    writeln!(writer, "Logged {kind} {name} ({calories} cal).")?;
    writeln!(
        writer,
        "Net total {} of {}, {} remaining.",
        summary.total,
        summary.limit,
        summary.remaining()
    )?;
    if summary.over_limit() {
        writeln!(writer, "Over the daily limit!")?;
    }
    Ok(())
}
