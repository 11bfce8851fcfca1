//! Remove command for deleting logged items by id.

use std::io::Write;

use anyhow::{Context, Result};
use uuid::Uuid;

use ct_core::ItemKind;
use ct_db::Tracker;

pub fn run<W: Write>(
    writer: &mut W,
    tracker: &mut Tracker,
    kind: ItemKind,
    id: Uuid,
) -> Result<()> {
    let removed = match kind {
        ItemKind::Meal => tracker.remove_meal(id),
        ItemKind::Workout => tracker.remove_workout(id),
    }
    .context("changes may not be saved")?;

    if removed {
        let summary = tracker.summary();
        writeln!(writer, "Removed {kind} {id}.")?;
        writeln!(
            writer,
            "Net total {} of {}, {} remaining.",
            summary.total,
            summary.limit,
            summary.remaining()
        )?;
    } else {
        // Idempotent delete: an unknown id is reported, not an error.
        writeln!(writer, "No {kind} with id {id}.")?;
    }
    Ok(())
}
