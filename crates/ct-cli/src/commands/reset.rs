//! Reset command for clearing the day's entries.

use std::io::Write;

use anyhow::{Context, Result};

use ct_db::Tracker;

pub fn run<W: Write>(writer: &mut W, tracker: &mut Tracker) -> Result<()> {
    tracker.reset().context("changes may not be saved")?;
    writeln!(
        writer,
        "Tracker reset. Daily limit of {} cal kept.",
        tracker.limit()
    )?;
    Ok(())
}
