//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `history.db` file in the configured output directory with
//! one table per aspect of the history: `agents`, `edges`, `vertices`,
//! `interventions` and `network_stats`.  Every row carries `run_id` and
//! `tick`, so a batch of runs can share one database.

use std::path::Path;

use rusqlite::Connection;
use rw_sim::TickSnapshot;

use crate::row::SnapshotRows;
use crate::writer::HistoryWriter;
use crate::OutputResult;

/// Writes simulation history to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `history.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("history.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS agents (
                 run_id                    INTEGER NOT NULL,
                 tick                      INTEGER NOT NULL,
                 id                        INTEGER NOT NULL,
                 name                      TEXT    NOT NULL,
                 beh                       TEXT    NOT NULL,
                 cur_risk                  REAL    NOT NULL,
                 attempt_count             INTEGER NOT NULL,
                 cur_attempt               INTEGER NOT NULL,
                 enrolled                  INTEGER NOT NULL,
                 emulatable_alters         INTEGER NOT NULL,
                 cur_emulations            INTEGER NOT NULL,
                 cur_emulated_risk_factors INTEGER NOT NULL,
                 current_spon_changes      INTEGER NOT NULL,
                 current_spon_risk_factors INTEGER NOT NULL,
                 recruited_alters          INTEGER NOT NULL,
                 pruned_alters             INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS edges (
                 run_id   INTEGER NOT NULL,
                 tick     INTEGER NOT NULL,
                 src_name TEXT    NOT NULL,
                 tar_name TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS vertices (
                 run_id INTEGER NOT NULL,
                 tick   INTEGER NOT NULL,
                 idx    INTEGER NOT NULL,
                 name   TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS interventions (
                 run_id             INTEGER NOT NULL,
                 tick               INTEGER NOT NULL,
                 type               TEXT    NOT NULL,
                 start_tick         INTEGER NOT NULL,
                 duration           INTEGER NOT NULL,
                 last_tick          INTEGER NOT NULL,
                 enrolled           INTEGER NOT NULL,
                 behaviors_improved INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS network_stats (
                 run_id INTEGER NOT NULL,
                 tick   INTEGER NOT NULL,
                 metric TEXT    NOT NULL,
                 value  REAL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl HistoryWriter for SqliteWriter {
    fn write_snapshot(&mut self, snapshot: &TickSnapshot) -> OutputResult<()> {
        let rows = SnapshotRows::from(snapshot);

        // One transaction per snapshot.
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agents \
                 (run_id, tick, id, name, beh, cur_risk, attempt_count, cur_attempt, enrolled, \
                  emulatable_alters, cur_emulations, cur_emulated_risk_factors, \
                  current_spon_changes, current_spon_risk_factors, recruited_alters, pruned_alters) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            )?;
            for r in &rows.agents {
                stmt.execute(rusqlite::params![
                    r.run_id as i64,
                    r.tick as i64,
                    r.id,
                    r.name,
                    r.beh,
                    r.cur_risk,
                    r.attempt_count as i64,
                    r.cur_attempt as i64,
                    r.enrolled as i64,
                    r.emulatable_alters as i64,
                    r.cur_emulations as i64,
                    r.cur_emulated_risk_factors as i64,
                    r.current_spon_changes as i64,
                    r.current_spon_risk_factors as i64,
                    r.recruited_alters as i64,
                    r.pruned_alters as i64,
                ])?;
            }

            let mut stmt = tx.prepare_cached(
                "INSERT INTO edges (run_id, tick, src_name, tar_name) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for r in &rows.edges {
                stmt.execute(rusqlite::params![r.run_id as i64, r.tick as i64, r.src_name, r.tar_name])?;
            }

            let mut stmt = tx.prepare_cached(
                "INSERT INTO vertices (run_id, tick, idx, name) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for r in &rows.vertices {
                stmt.execute(rusqlite::params![r.run_id as i64, r.tick as i64, r.index, r.name])?;
            }

            let mut stmt = tx.prepare_cached(
                "INSERT INTO interventions \
                 (run_id, tick, type, start_tick, duration, last_tick, enrolled, behaviors_improved) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for r in &rows.interventions {
                stmt.execute(rusqlite::params![
                    r.run_id as i64,
                    r.tick as i64,
                    r.kind,
                    r.start_tick as i64,
                    r.duration as i64,
                    r.last_tick as i64,
                    r.enrolled as i64,
                    r.behaviors_improved,
                ])?;
            }

            let mut stmt = tx.prepare_cached(
                "INSERT INTO network_stats (run_id, tick, metric, value) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for r in &rows.network {
                stmt.execute(rusqlite::params![r.run_id as i64, r.tick as i64, r.metric, r.value])?;
            }
        }
        tx.commit()?;
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
