//! Status command for showing totals against the daily limit.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use ct_db::Tracker;

/// Status figures for JSON output.
#[derive(Debug, Serialize)]
struct StatusJson {
    limit: i64,
    total: i64,
    consumed: i64,
    burned: i64,
    remaining: i64,
    over_limit: bool,
    /// Unclamped ratio of total to limit.
    progress: f64,
}

pub fn run<W: Write>(writer: &mut W, tracker: &Tracker, json: bool) -> Result<()> {
    let summary = tracker.summary();

    if json {
        let status = StatusJson {
            limit: summary.limit,
            total: summary.total,
            consumed: summary.consumed,
            burned: summary.burned,
            remaining: summary.remaining(),
            over_limit: summary.over_limit(),
            progress: summary.progress(),
        };
        serde_json::to_writer_pretty(&mut *writer, &status)?;
        writeln!(writer)?;
        return Ok(());
    }

    writeln!(writer, "Daily limit: {} cal", summary.limit)?;
    writeln!(writer, "Consumed:    {} cal", summary.consumed)?;
    writeln!(writer, "Burned:      {} cal", summary.burned)?;
    writeln!(writer, "Net total:   {} cal", summary.total)?;
    if summary.over_limit() {
        writeln!(writer, "Remaining:   {} cal (over limit)", summary.remaining())?;
    } else {
        writeln!(writer, "Remaining:   {} cal", summary.remaining())?;
    }
    writeln!(
        writer,
        "Progress:    {:.0}%",
        summary.progress_clamped() * 100.0
    )?;
    Ok(())
}
