//! Network-level intervention: rewire the graph and treat a fixed band of
//! behaviors across a randomly enrolled group.

use rw_core::InterventionParams;

use crate::state::{check_odds_ratios, clear_behaviors, enroll_by_chance};
use crate::targeting::target_behaviors;
use crate::{Effect, InterventionContext, InterventionResult, InterventionState, Policy};

pub struct NetworkIntervention {
    state: InterventionState,
}

impl NetworkIntervention {
    pub fn new(params: InterventionParams) -> Self {
        Self { state: InterventionState::new(params) }
    }
}

impl Policy for NetworkIntervention {
    fn state(&self) -> &InterventionState {
        &self.state
    }

    /// Enroll each agent with probability `p_enrolled` and fix the targeted
    /// behaviors from the severity band.
    fn setup(&mut self, ctx: &mut InterventionContext<'_>) -> InterventionResult<()> {
        check_odds_ratios(ctx)?;
        let targeted = target_behaviors(ctx.odds_ratios, self.state.params().tar_severity);
        let enrolled = enroll_by_chance(ctx, self.state.params().p_enrolled);
        self.state.enroll(&enrolled, targeted, ctx.population)
    }

    /// Rewire the whole graph, then clear each targeted behavior of each
    /// enrolled agent with probability `p_beh_change`.
    fn intervene(&mut self, ctx: &mut InterventionContext<'_>) -> InterventionResult<Effect> {
        let params = self.state.params();
        let (p_rewire, p_change) = (params.p_rewire, params.p_beh_change);

        let mut effect = Effect {
            edges_rewired: ctx.graph.rewire_edges(p_rewire, ctx.rng),
            ..Effect::default()
        };
        for who in self.state.enrolled_in_order(ctx)? {
            effect.behaviors_improved +=
                clear_behaviors(ctx, who, self.state.targeted_behaviors(), p_change);
        }

        self.state.record(&effect);
        Ok(effect)
    }
}
