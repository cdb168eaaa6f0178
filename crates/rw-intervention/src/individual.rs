//! Individual-level intervention: treat the highest-risk agents, each on
//! their own most severe active behaviors.  Never touches the graph.

use rw_core::InterventionParams;

use crate::state::{check_odds_ratios, clear_behaviors};
use crate::targeting::{prioritize_agents, priority_behaviors, treatable_count};
use crate::{Effect, InterventionContext, InterventionResult, InterventionState, Policy};

pub struct IndividualIntervention {
    state: InterventionState,

    /// Behaviors treated per enrollee per tick.  Fixed at setup.
    treatable: usize,
}

impl IndividualIntervention {
    pub fn new(params: InterventionParams) -> Self {
        Self { state: InterventionState::new(params), treatable: 0 }
    }

    pub fn treatable(&self) -> usize {
        self.treatable
    }
}

impl Policy for IndividualIntervention {
    fn state(&self) -> &InterventionState {
        &self.state
    }

    /// Enroll the top `round(p_enrolled · N)` agents by risk score.
    fn setup(&mut self, ctx: &mut InterventionContext<'_>) -> InterventionResult<()> {
        check_odds_ratios(ctx)?;
        let params = self.state.params();

        let n = ctx.population.len();
        let take = ((params.p_enrolled * n as f64).round_ties_even() as usize).min(n);
        let enrolled: Vec<_> = prioritize_agents(ctx.population, ctx.odds_ratios)
            .into_iter()
            .take(take)
            .collect();

        self.treatable = treatable_count(ctx.odds_ratios.len(), params.tar_severity);
        self.state.enroll(&enrolled, Vec::new(), ctx.population)
    }

    fn intervene(&mut self, ctx: &mut InterventionContext<'_>) -> InterventionResult<Effect> {
        let p_change = self.state.params().p_beh_change;
        let mut effect = Effect::default();

        for who in self.state.enrolled_in_order(ctx)? {
            let mut treat = priority_behaviors(&ctx.population.get(who).behavior, ctx.odds_ratios);
            treat.truncate(self.treatable);
            effect.behaviors_improved += clear_behaviors(ctx, who, &treat, p_change);
        }

        self.state.record(&effect);
        Ok(effect)
    }
}
