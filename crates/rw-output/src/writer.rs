//! The `HistoryWriter` trait implemented by all backend writers.

use rw_sim::TickSnapshot;

use crate::OutputResult;

/// Trait implemented by the JSON, CSV, and SQLite writers.
///
/// Writers can be fed one snapshot at a time while a run progresses (through
/// [`HistoryObserver`][crate::HistoryObserver]) or handed a finished history
/// with [`write_history`][Self::write_history].
pub trait HistoryWriter {
    /// Append one snapshot.
    fn write_snapshot(&mut self, snapshot: &TickSnapshot) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;

    /// Append every snapshot of `history`, in order.
    fn write_history(&mut self, history: &[TickSnapshot]) -> OutputResult<()> {
        for snapshot in history {
            self.write_snapshot(snapshot)?;
        }
        Ok(())
    }
}
