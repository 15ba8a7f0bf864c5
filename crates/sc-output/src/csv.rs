//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `craft_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CraftSnapshotRow, OutputResult, TickSummaryRow};

pub const SNAPSHOT_HEADER: [&str; 10] = [
    "craft_id", "tick", "kind", "x", "y", "heading", "velocity", "steering", "acceleration", "crashed",
];

pub const SUMMARY_HEADER: [&str; 4] = ["tick", "time_secs", "crashed_craft", "collisions"];

/// Writes trajectory output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("craft_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { snapshots, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[CraftSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.craft_id.to_string(),
                row.tick.to_string(),
                row.kind.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.heading.to_string(),
                row.velocity.to_string(),
                row.steering.to_string(),
                row.acceleration.to_string(),
                (row.crashed as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time_secs.to_string(),
            row.crashed_craft.to_string(),
            row.collisions.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
