//! Per-tick history records.
//!
//! A [`TickSnapshot`] is a deep copy of everything observable after a tick:
//! agents, edges, vertices, network statistics and intervention totals.
//! Field names follow the long-standing history format (`beh`, `cur_risk`,
//! `attempt_count`, ...) so downstream analysis keeps working.

use serde::{Deserialize, Serialize};

use rw_agent::{Agent, Population};
use rw_core::{AgentId, InterventionKind, Tick};
use rw_graph::SocialGraph;
use rw_intervention::{Intervention, Policy};

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id:   AgentId,
    pub name: String,

    /// Behavior vector as 0/1.
    #[serde(rename = "beh")]
    pub behavior: Vec<u8>,

    #[serde(rename = "cur_risk")]
    pub current_risk: f64,

    #[serde(rename = "attempt_count")]
    pub attempts: u64,

    pub enrolled: bool,

    pub max_alters: Option<usize>,

    #[serde(rename = "cur_attempt")]
    pub current_attempt: bool,

    pub emulatable_alters: usize,

    #[serde(rename = "cur_emulations")]
    pub emulations: usize,

    #[serde(rename = "cur_emulated_risk_factors")]
    pub emulated_risk_factors: usize,

    #[serde(rename = "current_spon_changes")]
    pub spon_changes: usize,

    #[serde(rename = "current_spon_risk_factors")]
    pub spon_risk_factors: usize,

    pub recruited_alters: usize,
    pub pruned_alters:    usize,
}

impl From<&Agent> for AgentRecord {
    fn from(a: &Agent) -> Self {
        let d = &a.diagnostics;
        Self {
            id:                    a.id,
            name:                  a.name.clone(),
            behavior:              a.behavior_bits(),
            current_risk:          a.current_risk,
            attempts:              a.attempts,
            enrolled:              a.enrolled,
            max_alters:            a.max_alters,
            current_attempt:       d.current_attempt,
            emulatable_alters:     d.emulatable_alters,
            emulations:            d.emulations,
            emulated_risk_factors: d.emulated_risk_factors,
            spon_changes:          d.spon_changes,
            spon_risk_factors:     d.spon_risk_factors,
            recruited_alters:      d.recruited_alters,
            pruned_alters:         d.pruned_alters,
        }
    }
}

/// One undirected edge, by vertex name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(rename = "src_name")]
    pub source: String,
    #[serde(rename = "tar_name")]
    pub target: String,
}

/// One vertex and its position in the graph at snapshot time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexRecord {
    pub index: u32,
    pub name:  String,
}

/// Graph-wide statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub edge_count: usize,
    pub density:    f64,

    /// Assortativity of each behavior index; `None` where undefined.
    pub beh_assortativity: Vec<Option<f64>>,

    /// Assortativity of the active-behavior count.
    pub risk_assortativity: Option<f64>,
}

impl NetworkStats {
    pub fn compute(population: &Population, graph: &SocialGraph, n_beh: usize) -> Self {
        let bit = |name: &str, i: usize| {
            population
                .by_name(name)
                .and_then(|a| a.behavior.get(i).copied())
                .map_or(0.0, |b| b as u8 as f64)
        };

        Self {
            edge_count:         graph.edge_count(),
            density:            graph.density(),
            beh_assortativity:  (0..n_beh).map(|i| graph.assortativity(|n| bit(n, i))).collect(),
            risk_assortativity: graph.assortativity(|n| {
                population.by_name(n).map_or(0.0, |a| a.active_count() as f64)
            }),
        }
    }
}

/// Cumulative state of one intervention.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionRecord {
    #[serde(rename = "type")]
    pub kind:               InterventionKind,
    pub start_tick:         Tick,
    pub duration:           u64,
    pub last_tick:          Tick,
    pub enrolled:           usize,
    pub behaviors_improved: i64,
}

impl From<&Intervention> for InterventionRecord {
    fn from(intv: &Intervention) -> Self {
        let state = intv.state();
        Self {
            kind:               state.kind(),
            start_tick:         state.start_tick(),
            duration:           state.params().duration,
            last_tick:          state.last_tick(),
            enrolled:           state.enrolled_names().map_or(0, <[String]>::len),
            behaviors_improved: state.behaviors_improved(),
        }
    }
}

// ── TickSnapshot ──────────────────────────────────────────────────────────────

/// Everything recorded for one entry of the history.
///
/// `history[k].tick == Tick(k)`: entry 0 is the state right after setup and
/// entry `k` the state after `k` ticks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub run_id:        u64,
    pub tick:          Tick,
    pub agents:        Vec<AgentRecord>,
    pub edges:         Vec<EdgeRecord>,
    pub vertices:      Vec<VertexRecord>,
    pub network:       NetworkStats,
    pub interventions: Vec<InterventionRecord>,
}

impl TickSnapshot {
    pub(crate) fn capture(
        run_id:        u64,
        tick:          Tick,
        population:    &Population,
        graph:         &SocialGraph,
        interventions: &[Intervention],
        n_beh:         usize,
    ) -> Self {
        Self {
            run_id,
            tick,
            agents:        population.iter().map(AgentRecord::from).collect(),
            edges:         graph
                .edges()
                .into_iter()
                .map(|(a, b)| EdgeRecord { source: a.to_owned(), target: b.to_owned() })
                .collect(),
            vertices:      graph
                .vertex_names()
                .enumerate()
                .map(|(i, name)| VertexRecord { index: i as u32, name: name.to_owned() })
                .collect(),
            network:       NetworkStats::compute(population, graph, n_beh),
            interventions: interventions.iter().map(InterventionRecord::from).collect(),
        }
    }

    /// Look up an agent record by name.
    pub fn agent(&self, name: &str) -> Option<&AgentRecord> {
        self.agents.iter().find(|a| a.name == name)
    }

    /// Total attempts across the population so far.
    pub fn total_attempts(&self) -> u64 {
        self.agents.iter().map(|a| a.attempts).sum()
    }
}
