//! `rw-output` — history writers for riskweb simulation runs.
//!
//! | Feature   | Backend | Files created                                                  |
//! |-----------|---------|----------------------------------------------------------------|
//! | *(none)*  | JSON    | `history.json`                                                 |
//! | *(none)*  | CSV     | `agents.csv`, `edges.csv`, `vertices.csv`, `interventions.csv`, `network_stats.csv` |
//! | `sqlite`  | SQLite  | `history.db`                                                   |
//!
//! All backends implement [`HistoryWriter`] and can be driven live by
//! [`HistoryObserver`], which implements `rw_sim::SimObserver`, or fed a
//! finished history with [`HistoryWriter::write_history`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use rw_output::{CsvWriter, HistoryObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = HistoryObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use json::JsonWriter;
pub use observer::HistoryObserver;
pub use row::{AgentRow, EdgeRow, InterventionRow, NetworkStatRow, SnapshotRows, VertexRow};
pub use writer::HistoryWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
