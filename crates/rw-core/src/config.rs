//! Run configuration.
//!
//! Every field a run recognises is enumerated here; unknown fields are
//! rejected at deserialization.  Missing top-level fields take the value
//! from [`SimConfig::default`], which is the ten-agent reference scenario.
//!
//! ```json
//! {
//!   "ticks": 30, "n_agents": 10, "n_beh": 3,
//!   "p_edge": 0.5, "p_emul": 0.5, "p_spon_change": 0.5, "sim_thresh": 0.5,
//!   "gen_sui_prev": 0.01, "gen_ave_beh": 0,
//!   "baserates": [0.5, 0.5, 0.5], "sui_ORs": [2, 3, 4],
//!   "intervention_params": [
//!     { "type": "Network", "start_tick": 15, "duration": 3,
//!       "tar_severity": [0.4, 1.0], "p_rewire": 0.25,
//!       "p_enrolled": 1.0, "p_beh_change": 1.0 }
//!   ]
//! }
//! ```
//!
//! [`SimConfig::validate`] is the single gate for every configuration-time
//! error: probabilities outside [0, 1], risk-model domain errors, and
//! intervention windows that run past the end of the simulation.

use std::fmt;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{RwError, RwResult, Tick};

// ── InterventionKind ──────────────────────────────────────────────────────────

/// Type tag selecting an intervention variant.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum InterventionKind {
    #[serde(alias = "NetworkIntervention")]
    Network,
    #[serde(alias = "IndividualIntervention")]
    Individual,
    #[serde(alias = "MockInterventionA")]
    MockA,
    #[serde(alias = "MockInterventionB")]
    MockB,
}

impl fmt::Display for InterventionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InterventionKind::Network    => "Network",
            InterventionKind::Individual => "Individual",
            InterventionKind::MockA      => "MockA",
            InterventionKind::MockB      => "MockB",
        };
        f.pad(s)
    }
}

// ── SeverityBand ──────────────────────────────────────────────────────────────

/// A `[lo, hi]` quantile window over behaviors ranked by odds ratio.
///
/// Serialized as a two-element array.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct SeverityBand {
    pub lo: f64,
    pub hi: f64,
}

impl SeverityBand {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// `(round(lo * n), round(hi * n))`, clamped to `0..=n` and ordered.
    ///
    /// Rounding is half-to-even, so `0.5 * 5` lands on 2, not 3.
    pub fn ranks(&self, n: usize) -> (usize, usize) {
        let lo = quantile_rank(self.lo, n);
        let hi = quantile_rank(self.hi, n);
        (lo.min(hi), hi)
    }
}

impl From<[f64; 2]> for SeverityBand {
    fn from([lo, hi]: [f64; 2]) -> Self {
        Self { lo, hi }
    }
}

impl From<SeverityBand> for [f64; 2] {
    fn from(band: SeverityBand) -> Self {
        [band.lo, band.hi]
    }
}

fn quantile_rank(q: f64, n: usize) -> usize {
    let r = (q * n as f64).round_ties_even();
    if r <= 0.0 { 0 } else { (r as usize).min(n) }
}

// ── AlterCapacity ─────────────────────────────────────────────────────────────

/// Upper bound on how many alters an agent may hold after recruiting.
///
/// Pruning is never limited; the cap only stops `recruit_alters` early.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlterCapacity {
    #[default]
    Unbounded,
    /// Each agent keeps the degree its vertex had in the generated graph.
    InitialDegree,
    Fixed(usize),
}

// ── InterventionParams ────────────────────────────────────────────────────────

/// Configuration of one intervention.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterventionParams {
    #[serde(rename = "type", alias = "intv_class_name")]
    pub kind: InterventionKind,

    /// First active tick; `setup` runs here.
    pub start_tick: Tick,

    /// Number of active ticks.  Must be at least 1.
    pub duration: u64,

    #[serde(default = "full_band")]
    pub tar_severity: SeverityBand,

    #[serde(default)]
    pub p_rewire: f64,

    pub p_enrolled: f64,

    pub p_beh_change: f64,
}

fn full_band() -> SeverityBand {
    SeverityBand::new(0.0, 1.0)
}

impl InterventionParams {
    /// `start_tick + duration - 1`, saturating at `u64::MAX`.
    pub fn last_tick(&self) -> Tick {
        Tick(self.start_tick.0.saturating_add(self.duration).saturating_sub(1))
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level configuration of one simulation run.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Total ticks to simulate.
    pub ticks: u64,

    /// Population size.  Fixed for the lifetime of the run.
    pub n_agents: usize,

    /// Length of every behavior vector.
    pub n_beh: usize,

    /// Edge probability of the initial Erdős–Rényi graph.
    pub p_edge: f64,

    /// Per-index probability of copying a random alter's behavior.
    pub p_emul: f64,

    /// Per-index probability of resampling a behavior from its baserate.
    pub p_spon_change: f64,

    /// Similarity at or above which alters are recruited and kept.
    pub sim_thresh: f64,

    /// General-population attempt prevalence, strictly inside (0, 1).
    pub gen_sui_prev: f64,

    /// Average active-behavior count of the general population.
    pub gen_ave_beh: f64,

    /// Background probability of each behavior.  Length `n_beh`.
    pub baserates: Vec<f64>,

    /// Attempt odds ratio of each behavior.  Length `n_beh`, all > 0.
    #[serde(rename = "sui_ORs", alias = "sui_ors")]
    pub sui_ors: Vec<f64>,

    pub intervention_params: Vec<InterventionParams>,

    pub alter_capacity: AlterCapacity,

    /// Seed for the run's `SimRng`.
    pub seed: u64,

    /// Identifier stamped on every history record of this run.
    #[serde(alias = "sim_id")]
    pub run_id: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks:               30,
            n_agents:            10,
            n_beh:               3,
            p_edge:              0.5,
            p_emul:              0.5,
            p_spon_change:       0.5,
            sim_thresh:          0.5,
            gen_sui_prev:        0.01,
            gen_ave_beh:         0.0,
            baserates:           vec![0.5; 3],
            sui_ors:             vec![2.0, 3.0, 4.0],
            intervention_params: Vec::new(),
            alter_capacity:      AlterCapacity::Unbounded,
            seed:                0,
            run_id:              0,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends.
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.ticks)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> RwResult<Self> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| RwError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`from_json_str`](Self::from_json_str) but reads from any `Read`.
    pub fn from_json_reader<R: Read>(reader: R) -> RwResult<Self> {
        let config: SimConfig =
            serde_json::from_reader(reader).map_err(|e| RwError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject every configuration a run cannot execute meaningfully.
    pub fn validate(&self) -> RwResult<()> {
        if self.ticks == 0 {
            return Err(config_err("ticks must be > 0"));
        }
        if self.n_agents == 0 {
            return Err(config_err("n_agents must be > 0"));
        }
        if self.n_beh == 0 {
            return Err(config_err("n_beh must be > 0"));
        }

        check_probability("p_edge", self.p_edge)?;
        check_probability("p_emul", self.p_emul)?;
        check_probability("p_spon_change", self.p_spon_change)?;
        check_probability("sim_thresh", self.sim_thresh)?;

        if !(self.gen_sui_prev > 0.0 && self.gen_sui_prev < 1.0) {
            return Err(config_err(format!(
                "gen_sui_prev must lie strictly inside (0, 1), got {}",
                self.gen_sui_prev
            )));
        }
        if !self.gen_ave_beh.is_finite() || self.gen_ave_beh < 0.0 {
            return Err(config_err(format!(
                "gen_ave_beh must be finite and >= 0, got {}",
                self.gen_ave_beh
            )));
        }

        if self.baserates.len() != self.n_beh {
            return Err(config_err(format!(
                "baserates has length {}, expected n_beh = {}",
                self.baserates.len(),
                self.n_beh
            )));
        }
        for (i, &b) in self.baserates.iter().enumerate() {
            check_probability(&format!("baserates[{i}]"), b)?;
        }

        if self.sui_ors.len() != self.n_beh {
            return Err(config_err(format!(
                "sui_ORs has length {}, expected n_beh = {}",
                self.sui_ors.len(),
                self.n_beh
            )));
        }
        for (i, &or) in self.sui_ors.iter().enumerate() {
            if !(or.is_finite() && or > 0.0) {
                return Err(config_err(format!("sui_ORs[{i}] must be finite and > 0, got {or}")));
            }
        }

        for (i, p) in self.intervention_params.iter().enumerate() {
            self.validate_intervention(i, p)?;
        }

        Ok(())
    }

    fn validate_intervention(&self, i: usize, p: &InterventionParams) -> RwResult<()> {
        let what = format!("intervention_params[{i}] ({})", p.kind);
        if p.duration == 0 {
            return Err(config_err(format!("{what}: duration must be >= 1")));
        }
        if p.start_tick.0.checked_add(p.duration).is_none() {
            return Err(config_err(format!(
                "{what}: start_tick {} + duration {} overflows",
                p.start_tick.0, p.duration
            )));
        }
        // A window may end on tick `ticks` itself; that last tick never runs.
        if p.last_tick() > self.end_tick() {
            return Err(config_err(format!(
                "{what}: window {}..={} exceeds total ticks {}",
                p.start_tick, p.last_tick(), self.ticks
            )));
        }
        let SeverityBand { lo, hi } = p.tar_severity;
        check_probability(&format!("{what}.tar_severity[0]"), lo)?;
        check_probability(&format!("{what}.tar_severity[1]"), hi)?;
        if lo > hi {
            return Err(config_err(format!("{what}: tar_severity lo {lo} > hi {hi}")));
        }
        check_probability(&format!("{what}.p_rewire"), p.p_rewire)?;
        check_probability(&format!("{what}.p_enrolled"), p.p_enrolled)?;
        check_probability(&format!("{what}.p_beh_change"), p.p_beh_change)?;
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config_err(msg: impl Into<String>) -> RwError {
    RwError::Config(msg.into())
}

fn check_probability(name: &str, value: f64) -> RwResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(config_err(format!("{name} must lie in [0, 1], got {value}")))
    }
}
