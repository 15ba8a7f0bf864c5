//! The `OutputWriter` trait implemented by all backend writers.

use crate::{CraftSnapshotRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors surface through [`TrajectoryObserver::take_error`][crate::TrajectoryObserver::take_error]
/// when the writer is driven by the observer.
pub trait OutputWriter {
    /// Write a batch of craft snapshots.
    fn write_snapshots(&mut self, rows: &[CraftSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
