//! CSV output backend.
//!
//! Creates five files in the configured output directory:
//! - `agents.csv`
//! - `edges.csv`
//! - `vertices.csv`
//! - `interventions.csv`
//! - `network_stats.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use rw_sim::TickSnapshot;

use crate::row::{
    AgentRow, EdgeRow, InterventionRow, NetworkStatRow, SnapshotRows, VertexRow, opt_to_string,
};
use crate::writer::HistoryWriter;
use crate::OutputResult;

/// Writes simulation history to five CSV files.
pub struct CsvWriter {
    agents:        Writer<File>,
    edges:         Writer<File>,
    vertices:      Writer<File>,
    interventions: Writer<File>,
    network:       Writer<File>,
    finished:      bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Ok(Self {
            agents:        open(dir, "agents.csv", &AgentRow::HEADER)?,
            edges:         open(dir, "edges.csv", &EdgeRow::HEADER)?,
            vertices:      open(dir, "vertices.csv", &VertexRow::HEADER)?,
            interventions: open(dir, "interventions.csv", &InterventionRow::HEADER)?,
            network:       open(dir, "network_stats.csv", &NetworkStatRow::HEADER)?,
            finished:      false,
        })
    }
}

fn open(dir: &Path, file: &str, header: &[&str]) -> OutputResult<Writer<File>> {
    let mut w = Writer::from_path(dir.join(file))?;
    w.write_record(header)?;
    Ok(w)
}

impl HistoryWriter for CsvWriter {
    fn write_snapshot(&mut self, snapshot: &TickSnapshot) -> OutputResult<()> {
        let rows = SnapshotRows::from(snapshot);

        for r in &rows.agents {
            self.agents.write_record(&[
                r.run_id.to_string(),
                r.tick.to_string(),
                r.id.to_string(),
                r.name.clone(),
                r.beh.clone(),
                r.cur_risk.to_string(),
                r.attempt_count.to_string(),
                (r.cur_attempt as u8).to_string(),
                (r.enrolled as u8).to_string(),
                r.emulatable_alters.to_string(),
                r.cur_emulations.to_string(),
                r.cur_emulated_risk_factors.to_string(),
                r.current_spon_changes.to_string(),
                r.current_spon_risk_factors.to_string(),
                r.recruited_alters.to_string(),
                r.pruned_alters.to_string(),
            ])?;
        }

        for r in &rows.edges {
            self.edges.write_record(&[
                r.run_id.to_string(),
                r.tick.to_string(),
                r.src_name.clone(),
                r.tar_name.clone(),
            ])?;
        }

        for r in &rows.vertices {
            self.vertices.write_record(&[
                r.run_id.to_string(),
                r.tick.to_string(),
                r.index.to_string(),
                r.name.clone(),
            ])?;
        }

        for r in &rows.interventions {
            self.interventions.write_record(&[
                r.run_id.to_string(),
                r.tick.to_string(),
                r.kind.clone(),
                r.start_tick.to_string(),
                r.duration.to_string(),
                r.last_tick.to_string(),
                r.enrolled.to_string(),
                r.behaviors_improved.to_string(),
            ])?;
        }

        for r in &rows.network {
            self.network.write_record(&[
                r.run_id.to_string(),
                r.tick.to_string(),
                r.metric.clone(),
                opt_to_string(r.value),
            ])?;
        }

        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.agents.flush()?;
        self.edges.flush()?;
        self.vertices.flush()?;
        self.interventions.flush()?;
        self.network.flush()?;
        Ok(())
    }
}
