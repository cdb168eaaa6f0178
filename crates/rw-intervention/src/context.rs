//! Mutable world state lent to an intervention for one call.

use rw_agent::Population;
use rw_core::{AgentId, SimRng, Tick};
use rw_graph::SocialGraph;

/// Everything a [`Policy`][crate::Policy] may read or mutate during `setup`
/// or `intervene`.
///
/// Built by the orchestrator immediately before each call and dropped right
/// after, so the borrows never outlive a single intervention step.  The
/// orchestrator remains the sole owner of the population, graph and RNG.
pub struct InterventionContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    pub population: &'a mut Population,

    pub graph: &'a mut SocialGraph,

    /// The run's only RNG.
    pub rng: &'a mut SimRng,

    /// Attempt odds ratio of each behavior.
    pub odds_ratios: &'a [f64],

    /// This tick's shuffled processing order.  Stochastic per-agent draws
    /// (enrollment, behavior changes) are taken in this order.
    pub order: &'a [AgentId],
}

impl<'a> InterventionContext<'a> {
    #[inline]
    pub fn new(
        tick:        Tick,
        population:  &'a mut Population,
        graph:       &'a mut SocialGraph,
        rng:         &'a mut SimRng,
        odds_ratios: &'a [f64],
        order:       &'a [AgentId],
    ) -> Self {
        Self { tick, population, graph, rng, odds_ratios, order }
    }
}
