//! `sc-output` — trajectory output writers for the spacecraft simulation engine.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                   |
//! |-----------|---------|-------------------------------------------------|
//! | *(none)*  | CSV     | `craft_snapshots.csv`, `tick_summaries.csv`     |
//! | `sqlite`  | SQLite  | `trajectories.db`                               |
//!
//! Both implement [`OutputWriter`] and are driven by [`TrajectoryObserver`],
//! which implements `sc_space::SpaceObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sc_output::{CsvWriter, TrajectoryObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TrajectoryObserver::new(writer, &config);
//! space.run_ticks(600, config.dt(), &mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TrajectoryObserver;
pub use row::{CraftSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
