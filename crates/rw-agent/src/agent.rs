//! The `Agent` record and the rules that involve no other agent.

use rw_core::{AgentId, SimRng};

use crate::{AgentError, AgentResult, RiskModel};

// ── TickDiagnostics ───────────────────────────────────────────────────────────

/// Counters describing what happened to one agent during the current tick.
///
/// Each rule resets the counters it owns before running, so after a full
/// pipeline pass these describe exactly that pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickDiagnostics {
    /// Whether the attempt draw succeeded this tick.
    pub current_attempt:       bool,
    /// Neighbors available to emulate.
    pub emulatable_alters:     usize,
    /// Behavior indices copied from a neighbor.
    pub emulations:            usize,
    /// Copied indices whose new value is active.
    pub emulated_risk_factors: usize,
    /// Behavior indices resampled from their baserate.
    pub spon_changes:          usize,
    /// Resampled indices whose new value is active.
    pub spon_risk_factors:     usize,
    pub recruited_alters:      usize,
    pub pruned_alters:         usize,
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One member of the population.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    pub id: AgentId,

    /// Graph key.  Never changes after setup.
    pub name: String,

    /// One flag per tracked risk factor; `true` means active.
    pub behavior: Vec<bool>,

    /// Attempt probability from the most recent risk evaluation.
    pub current_risk: f64,

    /// Cumulative successful attempt draws.
    pub attempts: u64,

    /// Set once any intervention has enrolled this agent; never cleared.
    pub enrolled: bool,

    /// Recruiting stops once the agent has this many alters.
    pub max_alters: Option<usize>,

    pub diagnostics: TickDiagnostics,
}

impl Agent {
    /// An agent named `id_<n>` with the given behavior vector.
    pub fn new(id: AgentId, behavior: Vec<bool>) -> Self {
        Self {
            id,
            name:         id.default_name(),
            behavior,
            current_risk: 0.0,
            attempts:     0,
            enrolled:     false,
            max_alters:   None,
            diagnostics:  TickDiagnostics::default(),
        }
    }

    /// An agent whose behavior `i` is active with probability `baserates[i]`.
    pub fn sample(id: AgentId, baserates: &[f64], rng: &mut SimRng) -> Self {
        let behavior = baserates.iter().map(|&p| rng.gen_bool(p)).collect();
        Self::new(id, behavior)
    }

    pub fn with_max_alters(mut self, max_alters: Option<usize>) -> Self {
        self.max_alters = max_alters;
        self
    }

    /// Number of active risk factors.
    pub fn active_count(&self) -> usize {
        self.behavior.iter().filter(|&&b| b).count()
    }

    /// Behavior vector as 0/1 integers.
    pub fn behavior_bits(&self) -> Vec<u8> {
        self.behavior.iter().map(|&b| b as u8).collect()
    }

    /// Fraction of behavior indices on which `self` and `other` agree.
    pub fn similarity(&self, other: &Agent) -> AgentResult<f64> {
        self.check_len(other.behavior.len())?;
        if self.behavior.is_empty() {
            return Ok(1.0);
        }
        let same = self
            .behavior
            .iter()
            .zip(&other.behavior)
            .filter(|(a, b)| a == b)
            .count();
        Ok(same as f64 / self.behavior.len() as f64)
    }

    /// For each index independently, copy `source`'s value with probability `p`.
    pub fn emulate_from(&mut self, source: &Agent, p: f64, rng: &mut SimRng) -> AgentResult<()> {
        self.check_len(source.behavior.len())?;
        for (mine, &theirs) in self.behavior.iter_mut().zip(&source.behavior) {
            if rng.gen_bool(p) {
                *mine = theirs;
            }
        }
        Ok(())
    }

    /// For each index independently, with probability `susceptibility`,
    /// redraw the value as Bernoulli(`baserates[i]`).
    pub fn spontaneous_change(
        &mut self,
        baserates:      &[f64],
        susceptibility: f64,
        rng:            &mut SimRng,
    ) -> AgentResult<()> {
        self.check_len(baserates.len())?;
        self.diagnostics.spon_changes = 0;
        self.diagnostics.spon_risk_factors = 0;

        for (b, &rate) in self.behavior.iter_mut().zip(baserates) {
            if rng.gen_bool(susceptibility) {
                *b = rng.gen_bool(rate);
                self.diagnostics.spon_changes += 1;
                self.diagnostics.spon_risk_factors += *b as usize;
            }
        }
        Ok(())
    }

    /// Evaluate and store the current attempt probability.
    pub fn suicide_risk(&mut self, model: &RiskModel) -> AgentResult<f64> {
        self.check_len(model.n_beh())?;
        self.current_risk = model.risk(&self.behavior);
        Ok(self.current_risk)
    }

    /// One Bernoulli draw at the current risk.  Increments `attempts` on
    /// success and returns the outcome.
    pub fn consider_attempt(&mut self, model: &RiskModel, rng: &mut SimRng) -> AgentResult<bool> {
        let risk = self.suicide_risk(model)?;
        let attempt = rng.gen_bool(risk);
        if attempt {
            self.attempts += 1;
        }
        self.diagnostics.current_attempt = attempt;
        Ok(attempt)
    }

    fn check_len(&self, other: usize) -> AgentResult<()> {
        if self.behavior.len() == other {
            Ok(())
        } else {
            Err(AgentError::LengthMismatch {
                expected: self.behavior.len(),
                got:      other,
            })
        }
    }
}
