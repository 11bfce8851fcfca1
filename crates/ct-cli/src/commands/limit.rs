//! Set-limit command for changing the daily target.

use std::io::Write;

use anyhow::{Context, Result};

use ct_db::Tracker;

pub fn run<W: Write>(writer: &mut W, tracker: &mut Tracker, limit: i64) -> Result<()> {
    tracker
        .set_limit(limit)
        .context("changes may not be saved")?;

    let summary = tracker.summary();
    writeln!(writer, "Daily limit set to {limit} cal.")?;
    writeln!(writer, "{} remaining today.", summary.remaining())?;
    Ok(())
}
