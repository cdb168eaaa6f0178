//! `HistoryObserver<W>` — bridges `SimObserver` to a `HistoryWriter`.

use rw_core::Tick;
use rw_sim::{SimObserver, TickSnapshot};

use crate::writer::HistoryWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams every history entry to a
/// [`HistoryWriter`] backend (JSON, CSV, SQLite) as the run progresses.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].  Once a write has failed, later
/// snapshots are skipped.
pub struct HistoryObserver<W: HistoryWriter> {
    writer:     W,
    snapshots:  usize,
    last_error: Option<OutputError>,
}

impl<W: HistoryWriter> HistoryObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, snapshots: 0, last_error: None }
    }

    /// Snapshots successfully handed to the writer.
    pub fn snapshots_written(&self) -> usize {
        self.snapshots
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                // Keep only the first error.
                if self.last_error.is_none() {
                    self.last_error = Some(e);
                }
                false
            }
        }
    }
}

impl<W: HistoryWriter> SimObserver for HistoryObserver<W> {
    fn on_snapshot(&mut self, snapshot: &TickSnapshot) {
        if self.last_error.is_some() {
            return;
        }
        let result = self.writer.write_snapshot(snapshot);
        if self.store_err(result) {
            self.snapshots += 1;
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
