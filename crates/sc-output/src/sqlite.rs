//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `trajectories.db` file in the configured output directory
//! with two tables: `craft_snapshots` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{CraftSnapshotRow, OutputResult, TickSummaryRow};

/// Writes trajectory output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `trajectories.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("trajectories.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS craft_snapshots (
                 craft_id     INTEGER NOT NULL,
                 tick         INTEGER NOT NULL,
                 kind         TEXT    NOT NULL,
                 x            REAL    NOT NULL,
                 y            REAL    NOT NULL,
                 heading      REAL    NOT NULL,
                 velocity     REAL    NOT NULL,
                 steering     REAL    NOT NULL,
                 acceleration REAL    NOT NULL,
                 crashed      INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick          INTEGER PRIMARY KEY,
                 time_secs     REAL    NOT NULL,
                 crashed_craft INTEGER NOT NULL,
                 collisions    INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[CraftSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO craft_snapshots \
                 (craft_id, tick, kind, x, y, heading, velocity, steering, acceleration, crashed) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.craft_id,
                    row.tick as i64,
                    row.kind,
                    row.x,
                    row.y,
                    row.heading,
                    row.velocity,
                    row.steering,
                    row.acceleration,
                    row.crashed as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, time_secs, crashed_craft, collisions) \
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                row.tick as i64,
                row.time_secs,
                row.crashed_craft as i64,
                row.collisions as i64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
