//! Lifecycle bookkeeping shared by every intervention variant.

use rw_agent::Population;
use rw_core::{AgentId, InterventionKind, InterventionParams, Tick};

use crate::{InterventionContext, InterventionError, InterventionResult};

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Where an intervention is in its window at a given tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Before `start_tick`.
    Pending,
    /// `start_tick ..= last_tick`.
    Active,
    /// After `last_tick`.  Never reactivates.
    Expired,
}

// ── Effect ────────────────────────────────────────────────────────────────────

/// What one `intervene` call changed.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Effect {
    /// Net reduction in active risk factors.
    pub behaviors_improved: i64,
    pub edges_rewired:      usize,
    pub edges_removed:      usize,
}

// ── InterventionState ─────────────────────────────────────────────────────────

/// Parameters plus everything captured at setup.
#[derive(Clone, Debug)]
pub struct InterventionState {
    params: InterventionParams,

    /// `None` until setup; immutable once captured.
    enrolled_names: Option<Vec<String>>,

    targeted: Vec<usize>,

    /// Cumulative over all `intervene` calls.
    behaviors_improved: i64,
}

impl InterventionState {
    pub fn new(params: InterventionParams) -> Self {
        Self {
            params,
            enrolled_names:     None,
            targeted:           Vec::new(),
            behaviors_improved: 0,
        }
    }

    pub fn params(&self) -> &InterventionParams {
        &self.params
    }

    pub fn kind(&self) -> InterventionKind {
        self.params.kind
    }

    pub fn start_tick(&self) -> Tick {
        self.params.start_tick
    }

    pub fn last_tick(&self) -> Tick {
        self.params.last_tick()
    }

    pub fn phase(&self, t: Tick) -> Phase {
        if t < self.start_tick() {
            Phase::Pending
        } else if t <= self.last_tick() {
            Phase::Active
        } else {
            Phase::Expired
        }
    }

    #[inline]
    pub fn is_setup_phase(&self, t: Tick) -> bool {
        t == self.start_tick()
    }

    #[inline]
    pub fn is_active_phase(&self, t: Tick) -> bool {
        self.phase(t) == Phase::Active
    }

    pub fn is_setup(&self) -> bool {
        self.enrolled_names.is_some()
    }

    /// Names captured at setup, in enrollment order.
    pub fn enrolled_names(&self) -> Option<&[String]> {
        self.enrolled_names.as_deref()
    }

    /// Behavior indices the intervention acts on.  Empty for variants that
    /// choose behaviors per agent.
    pub fn targeted_behaviors(&self) -> &[usize] {
        &self.targeted
    }

    pub fn behaviors_improved(&self) -> i64 {
        self.behaviors_improved
    }

    // ── Crate-internal mutation ───────────────────────────────────────────

    /// Store the enrollment and mark each enrolled agent.  Fails if an
    /// enrollment was already captured.
    pub(crate) fn enroll(
        &mut self,
        ids:        &[AgentId],
        targeted:   Vec<usize>,
        population: &mut Population,
    ) -> InterventionResult<()> {
        if self.is_setup() {
            return Err(InterventionError::AlreadySetup(self.kind().to_string()));
        }
        let mut names = Vec::with_capacity(ids.len());
        for &id in ids {
            let agent = population.get_mut(id);
            agent.enrolled = true;
            names.push(agent.name.clone());
        }
        self.enrolled_names = Some(names);
        self.targeted = targeted;
        Ok(())
    }

    /// Enrolled agents resolved by name, in this tick's processing order.
    pub(crate) fn enrolled_in_order(
        &self,
        ctx: &InterventionContext<'_>,
    ) -> InterventionResult<Vec<AgentId>> {
        let names = self
            .enrolled_names
            .as_deref()
            .ok_or_else(|| InterventionError::NotSetup(self.kind().to_string()))?;

        let mut member = vec![false; ctx.population.len()];
        for name in names {
            member[ctx.population.id_of(name)?.index()] = true;
        }
        Ok(ctx.order.iter().copied().filter(|id| member[id.index()]).collect())
    }

    pub(crate) fn record(&mut self, effect: &Effect) {
        self.behaviors_improved += effect.behaviors_improved;
    }
}

// ── Shared steps ──────────────────────────────────────────────────────────────

/// Check that the odds ratios line up with the population's behavior length.
pub(crate) fn check_odds_ratios(ctx: &InterventionContext<'_>) -> InterventionResult<()> {
    let got = ctx.odds_ratios.len();
    match ctx.population.iter().find(|a| a.behavior.len() != got) {
        Some(a) => Err(InterventionError::OddsRatioMismatch { expected: a.behavior.len(), got }),
        None => Ok(()),
    }
}

/// Each agent, in processing order, independently with probability `p`.
pub(crate) fn enroll_by_chance(ctx: &mut InterventionContext<'_>, p: f64) -> Vec<AgentId> {
    let order = ctx.order;
    order.iter().copied().filter(|_| ctx.rng.gen_bool(p)).collect()
}

/// For each index, with probability `p`, clear the bit.  Returns how many
/// bits actually went from active to inactive.
pub(crate) fn clear_behaviors(
    ctx:     &mut InterventionContext<'_>,
    who:     AgentId,
    indices: &[usize],
    p:       f64,
) -> i64 {
    let mut improved = 0;
    for &i in indices {
        if !ctx.rng.gen_bool(p) {
            continue;
        }
        let behavior = &mut ctx.population.get_mut(who).behavior;
        if let Some(bit) = behavior.get_mut(i) {
            if *bit {
                improved += 1;
            }
            *bit = false;
        }
    }
    improved
}
