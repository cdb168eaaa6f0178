//! JSON output backend.
//!
//! Streams the history into `history.json` as a single array of snapshots.
//! The closing bracket is written by [`finish`][HistoryWriter::finish]; a
//! writer dropped before that leaves a truncated file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rw_sim::TickSnapshot;

use crate::writer::HistoryWriter;
use crate::OutputResult;

pub struct JsonWriter {
    out:      BufWriter<File>,
    written:  usize,
    finished: bool,
}

impl JsonWriter {
    /// Create `history.json` in `dir` and open the array.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut out = BufWriter::new(File::create(dir.join("history.json"))?);
        out.write_all(b"[")?;
        Ok(Self { out, written: 0, finished: false })
    }

    /// Number of snapshots written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl HistoryWriter for JsonWriter {
    fn write_snapshot(&mut self, snapshot: &TickSnapshot) -> OutputResult<()> {
        if self.written > 0 {
            self.out.write_all(b",\n")?;
        }
        serde_json::to_writer(&mut self.out, snapshot)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.write_all(b"]\n")?;
        self.out.flush()?;
        Ok(())
    }
}
