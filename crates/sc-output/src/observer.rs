//! `TrajectoryObserver<W>` — bridges `SpaceObserver` to an `OutputWriter`.

use log::warn;
use sc_core::{CraftId, SimConfig, Tick};
use sc_craft::Craft;
use sc_space::{Space, SpaceObserver};

use crate::row::{CraftSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SpaceObserver`] that writes craft snapshots and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Obstacles are static scenery and are left out of the snapshot rows.
///
/// Errors from the writer are stored internally because `SpaceObserver`
/// methods have no return value.  After `space.run_ticks()` returns, check
/// for errors with [`take_error`][Self::take_error].
pub struct TrajectoryObserver<W: OutputWriter> {
    writer:          W,
    dt:              f64,
    interval:        u64,
    tick_collisions: u64,
    last_error:      Option<OutputError>,
}

impl<W: OutputWriter> TrajectoryObserver<W> {
    /// Create an observer backed by `writer`, using `config` for the
    /// tick-to-seconds conversion.  Snapshots are written every tick.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            dt:              config.dt(),
            interval:        1,
            tick_collisions: 0,
            last_error:      None,
        }
    }

    /// Only write craft snapshots on ticks that are a multiple of `ticks`.
    /// Summaries are still written every tick.
    pub fn with_interval(mut self, ticks: u64) -> Self {
        self.interval = ticks.max(1);
        self
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("trajectory output failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

fn snapshot_row(tick: Tick, craft: &Craft) -> CraftSnapshotRow {
    let action = craft.action();
    CraftSnapshotRow {
        craft_id:     craft.id().into(),
        tick:         tick.0,
        kind:         craft.kind().label(),
        x:            craft.position().x,
        y:            craft.position().y,
        heading:      craft.heading(),
        velocity:     craft.velocity(),
        steering:     action.steering,
        acceleration: action.acceleration,
        crashed:      craft.is_crashed(),
    }
}

impl<W: OutputWriter> SpaceObserver for TrajectoryObserver<W> {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.tick_collisions = 0;
    }

    fn on_collision(&mut self, _tick: Tick, _a: CraftId, _b: CraftId) {
        self.tick_collisions += 1;
    }

    fn on_tick_end(&mut self, tick: Tick, crashed: usize) {
        let row = TickSummaryRow {
            tick:          tick.0,
            time_secs:     (tick.0 + 1) as f64 * self.dt,
            crashed_craft: crashed as u64,
            collisions:    self.tick_collisions,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, space: &Space) {
        if !tick.0.is_multiple_of(self.interval) {
            return;
        }
        let rows: Vec<CraftSnapshotRow> = space
            .iter()
            .filter(|c| !c.kind().is_obstacle())
            .map(|c| snapshot_row(tick, c))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
