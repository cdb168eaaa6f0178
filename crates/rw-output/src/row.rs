//! Flat row types written by the tabular backends.
//!
//! One [`TickSnapshot`] flattens into five tables, every row tagged with the
//! run id and tick so many runs can share one set of files or one database.

use rw_sim::TickSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub struct AgentRow {
    pub run_id:                    u64,
    pub tick:                      u64,
    pub id:                        u32,
    pub name:                      String,
    /// Behavior vector as a string of `0`/`1` digits, index 0 first.
    pub beh:                       String,
    pub cur_risk:                  f64,
    pub attempt_count:             u64,
    pub cur_attempt:               bool,
    pub enrolled:                  bool,
    pub emulatable_alters:         u64,
    pub cur_emulations:            u64,
    pub cur_emulated_risk_factors: u64,
    pub current_spon_changes:      u64,
    pub current_spon_risk_factors: u64,
    pub recruited_alters:          u64,
    pub pruned_alters:             u64,
}

impl AgentRow {
    pub const HEADER: [&'static str; 16] = [
        "run_id", "tick", "id", "name", "beh", "cur_risk", "attempt_count", "cur_attempt",
        "enrolled", "emulatable_alters", "cur_emulations", "cur_emulated_risk_factors",
        "current_spon_changes", "current_spon_risk_factors", "recruited_alters", "pruned_alters",
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRow {
    pub run_id:   u64,
    pub tick:     u64,
    pub src_name: String,
    pub tar_name: String,
}

impl EdgeRow {
    pub const HEADER: [&'static str; 4] = ["run_id", "tick", "src_name", "tar_name"];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexRow {
    pub run_id: u64,
    pub tick:   u64,
    pub index:  u32,
    pub name:   String,
}

impl VertexRow {
    pub const HEADER: [&'static str; 4] = ["run_id", "tick", "index", "name"];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterventionRow {
    pub run_id:             u64,
    pub tick:               u64,
    pub kind:               String,
    pub start_tick:         u64,
    pub duration:           u64,
    pub last_tick:          u64,
    pub enrolled:           u64,
    pub behaviors_improved: i64,
}

impl InterventionRow {
    pub const HEADER: [&'static str; 8] = [
        "run_id", "tick", "type", "start_tick", "duration", "last_tick", "enrolled",
        "behaviors_improved",
    ];
}

/// One network statistic in long format: `metric` is `edge_count`,
/// `density`, `risk_assortativity` or `beh<i>_assortativity`.  `value` is
/// `None` where the statistic is undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkStatRow {
    pub run_id: u64,
    pub tick:   u64,
    pub metric: String,
    pub value:  Option<f64>,
}

impl NetworkStatRow {
    pub const HEADER: [&'static str; 4] = ["run_id", "tick", "metric", "value"];
}

// ── Flattening ────────────────────────────────────────────────────────────────

/// All rows of one snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotRows {
    pub agents:        Vec<AgentRow>,
    pub edges:         Vec<EdgeRow>,
    pub vertices:      Vec<VertexRow>,
    pub interventions: Vec<InterventionRow>,
    pub network:       Vec<NetworkStatRow>,
}

impl From<&TickSnapshot> for SnapshotRows {
    fn from(s: &TickSnapshot) -> Self {
        let (run_id, tick) = (s.run_id, s.tick.0);

        let agents = s
            .agents
            .iter()
            .map(|a| AgentRow {
                run_id,
                tick,
                id:                        a.id.0,
                name:                      a.name.clone(),
                beh:                       a.behavior.iter().map(|b| char::from(b'0' + b)).collect(),
                cur_risk:                  a.current_risk,
                attempt_count:             a.attempts,
                cur_attempt:               a.current_attempt,
                enrolled:                  a.enrolled,
                emulatable_alters:         a.emulatable_alters as u64,
                cur_emulations:            a.emulations as u64,
                cur_emulated_risk_factors: a.emulated_risk_factors as u64,
                current_spon_changes:      a.spon_changes as u64,
                current_spon_risk_factors: a.spon_risk_factors as u64,
                recruited_alters:          a.recruited_alters as u64,
                pruned_alters:             a.pruned_alters as u64,
            })
            .collect();

        let edges = s
            .edges
            .iter()
            .map(|e| EdgeRow {
                run_id,
                tick,
                src_name: e.source.clone(),
                tar_name: e.target.clone(),
            })
            .collect();

        let vertices = s
            .vertices
            .iter()
            .map(|v| VertexRow { run_id, tick, index: v.index, name: v.name.clone() })
            .collect();

        let interventions = s
            .interventions
            .iter()
            .map(|i| InterventionRow {
                run_id,
                tick,
                kind:               i.kind.to_string(),
                start_tick:         i.start_tick.0,
                duration:           i.duration,
                last_tick:          i.last_tick.0,
                enrolled:           i.enrolled as u64,
                behaviors_improved: i.behaviors_improved,
            })
            .collect();

        let stat = |metric: String, value: Option<f64>| NetworkStatRow { run_id, tick, metric, value };
        let mut network = vec![
            stat("edge_count".to_owned(), Some(s.network.edge_count as f64)),
            stat("density".to_owned(), Some(s.network.density)),
            stat("risk_assortativity".to_owned(), s.network.risk_assortativity),
        ];
        network.extend(
            s.network
                .beh_assortativity
                .iter()
                .enumerate()
                .map(|(i, &r)| stat(format!("beh{i}_assortativity"), r)),
        );

        Self { agents, edges, vertices, interventions, network }
    }
}

/// Empty string for `None`, the number otherwise.
pub(crate) fn opt_to_string(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
