//! Placeholder interventions used to exercise the pipeline.
//!
//! Both reset an enrollee's whole vector to exactly two active behaviors in
//! random positions, which can make an agent worse as well as better.
//! `MockB` also deletes edges at random.

use rw_core::{AgentId, InterventionParams};

use crate::state::{check_odds_ratios, enroll_by_chance};
use crate::targeting::target_behaviors;
use crate::{Effect, InterventionContext, InterventionResult, InterventionState, Policy};

/// Active behaviors left after a mock reset.
const RESET_ACTIVE: usize = 2;

pub struct MockA {
    state: InterventionState,
}

pub struct MockB {
    state: InterventionState,
}

impl MockA {
    pub fn new(params: InterventionParams) -> Self {
        Self { state: InterventionState::new(params) }
    }
}

impl MockB {
    pub fn new(params: InterventionParams) -> Self {
        Self { state: InterventionState::new(params) }
    }
}

impl Policy for MockA {
    fn state(&self) -> &InterventionState {
        &self.state
    }

    fn setup(&mut self, ctx: &mut InterventionContext<'_>) -> InterventionResult<()> {
        setup_by_chance(&mut self.state, ctx)
    }

    fn intervene(&mut self, ctx: &mut InterventionContext<'_>) -> InterventionResult<Effect> {
        let effect = Effect {
            behaviors_improved: reset_enrolled(&self.state, ctx)?,
            ..Effect::default()
        };
        self.state.record(&effect);
        Ok(effect)
    }
}

impl Policy for MockB {
    fn state(&self) -> &InterventionState {
        &self.state
    }

    fn setup(&mut self, ctx: &mut InterventionContext<'_>) -> InterventionResult<()> {
        setup_by_chance(&mut self.state, ctx)
    }

    fn intervene(&mut self, ctx: &mut InterventionContext<'_>) -> InterventionResult<Effect> {
        let edges_removed = ctx.graph.delete_random_edges(self.state.params().p_rewire, ctx.rng);
        let effect = Effect {
            behaviors_improved: reset_enrolled(&self.state, ctx)?,
            edges_removed,
            ..Effect::default()
        };
        self.state.record(&effect);
        Ok(effect)
    }
}

// ── Shared ────────────────────────────────────────────────────────────────────

fn setup_by_chance(
    state: &mut InterventionState,
    ctx:   &mut InterventionContext<'_>,
) -> InterventionResult<()> {
    check_odds_ratios(ctx)?;
    let targeted = target_behaviors(ctx.odds_ratios, state.params().tar_severity);
    let enrolled = enroll_by_chance(ctx, state.params().p_enrolled);
    state.enroll(&enrolled, targeted, ctx.population)
}

/// With probability `p_beh_change`, reset each enrollee.  Returns the net
/// reduction in active behaviors, which may be negative.
fn reset_enrolled(
    state: &InterventionState,
    ctx:   &mut InterventionContext<'_>,
) -> InterventionResult<i64> {
    let p_change = state.params().p_beh_change;
    let mut improved = 0;
    for who in state.enrolled_in_order(ctx)? {
        if ctx.rng.gen_bool(p_change) {
            improved += reset_behavior(ctx, who);
        }
    }
    Ok(improved)
}

fn reset_behavior(ctx: &mut InterventionContext<'_>, who: AgentId) -> i64 {
    let agent = ctx.population.get_mut(who);
    let before = agent.active_count() as i64;

    let n = agent.behavior.len();
    let mut fresh: Vec<bool> = (0..n).map(|i| i < RESET_ACTIVE).collect();
    ctx.rng.shuffle(&mut fresh);
    agent.behavior = fresh;

    before - RESET_ACTIVE.min(n) as i64
}
