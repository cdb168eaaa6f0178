//! The `Simulation` struct and its tick loop.

use tracing::{debug, info, warn};

use rw_agent::{Population, RiskModel};
use rw_core::{AgentId, AlterCapacity, InterventionKind, SimConfig, SimRng, Tick};
use rw_graph::{SocialGraph, erdos_renyi};
use rw_intervention::{Intervention, InterventionContext, Policy};

use crate::{NoopObserver, SimError, SimObserver, SimResult, TickSnapshot, TickSummary};

// ── SimState ──────────────────────────────────────────────────────────────────

/// Lifecycle of a run.
///
/// ```text
/// NotSetup ──setup()──► Ready ──tick()──► Ticking ──(last tick)──► Done
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SimState {
    NotSetup,
    /// Set up; no tick run yet.
    Ready,
    /// At least one tick run, some remaining.
    Ticking,
    /// All configured ticks run.
    Done,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Everything created by `setup`.
struct World {
    population:    Population,
    graph:         SocialGraph,
    interventions: Vec<Intervention>,
    /// Processing order, reshuffled at the start of every tick.
    order:         Vec<AgentId>,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// One simulation run.
///
/// The run owns its population, graph, interventions and RNG outright, and
/// lends them to agents and interventions one call at a time.  Each tick:
///
/// 1. validate;
/// 2. shuffle the processing order;
/// 3. per intervention: `setup` on its start tick, `intervene` while active;
/// 4. per agent, in the shuffled order: emulate → prune → recruit →
///    spontaneous change → consider attempt.  Later agents observe the
///    mutations made by earlier ones;
/// 5. validate, append a [`TickSnapshot`], advance the tick counter.
pub struct Simulation {
    config:       SimConfig,
    risk:         RiskModel,
    rng:          SimRng,
    state:        SimState,
    current_tick: Tick,
    world:        Option<World>,
    history:      Vec<TickSnapshot>,
}

impl Simulation {
    /// Validate `config` and prepare a run.  Nothing is generated until
    /// [`setup`][Self::setup].
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let risk = RiskModel::new(&config.sui_ors, config.gen_sui_prev, config.gen_ave_beh)?;
        Ok(Self {
            rng:          SimRng::for_run(config.seed, config.run_id),
            risk,
            config,
            state:        SimState::NotSetup,
            current_tick: Tick::ZERO,
            world:        None,
            history:      Vec::new(),
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Ticks left before the run is done.
    pub fn remaining_ticks(&self) -> u64 {
        self.config.ticks.saturating_sub(self.current_tick.0)
    }

    /// Every snapshot recorded so far, oldest first.
    pub fn history(&self) -> &[TickSnapshot] {
        &self.history
    }

    pub fn into_history(self) -> Vec<TickSnapshot> {
        self.history
    }

    pub fn population(&self) -> Option<&Population> {
        self.world.as_ref().map(|w| &w.population)
    }

    pub fn graph(&self) -> Option<&SocialGraph> {
        self.world.as_ref().map(|w| &w.graph)
    }

    /// Mutable access to the live population, for tests that break
    /// invariants on purpose.
    #[cfg(test)]
    pub(crate) fn population_mut(&mut self) -> Option<&mut Population> {
        self.world.as_mut().map(|w| &mut w.population)
    }

    /// Empty before setup.
    pub fn interventions(&self) -> &[Intervention] {
        self.world
            .as_ref()
            .map(|w| w.interventions.as_slice())
            .unwrap_or_default()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Generate the graph and population, instantiate the interventions,
    /// validate, and record the tick-0 snapshot.
    pub fn setup(&mut self) -> SimResult<()> {
        if self.state != SimState::NotSetup {
            return Err(SimError::AlreadySetup);
        }
        let c = &self.config;

        // Vertices first, then one agent per vertex under the same name.
        let names = (0..c.n_agents as u32).map(|i| AgentId(i).default_name());
        let graph = erdos_renyi(names, c.p_edge, &mut self.rng)?;
        let mut population = Population::sample(c.n_agents, &c.baserates, &mut self.rng);

        for agent in population.iter_mut() {
            agent.max_alters = match c.alter_capacity {
                AlterCapacity::Unbounded     => None,
                AlterCapacity::InitialDegree => Some(graph.degree(&agent.name)?),
                AlterCapacity::Fixed(cap)    => Some(cap),
            };
        }

        let interventions: Vec<Intervention> = c
            .intervention_params
            .iter()
            .cloned()
            .map(Intervention::from_params)
            .collect();
        let order = population.ids().collect();

        // Windows may end on tick `ticks`, but `tick()` never runs that tick.
        for p in c.intervention_params.iter().filter(|p| p.last_tick() >= c.end_tick()) {
            warn!(
                kind       = %p.kind,
                start_tick = p.start_tick.0,
                last_tick  = p.last_tick().0,
                ticks      = c.ticks,
                "intervention window reaches the end of the run; its final tick never runs"
            );
        }

        info!(
            run_id        = c.run_id,
            agents        = population.len(),
            edges         = graph.edge_count(),
            interventions = interventions.len(),
            ticks         = c.ticks,
            "simulation set up"
        );

        self.world = Some(World { population, graph, interventions, order });
        self.validate()?;
        self.record(Tick::ZERO)?;
        self.state = SimState::Ready;
        Ok(())
    }

    /// Run one tick.  Fails before setup and after the last tick.
    pub fn tick(&mut self) -> SimResult<TickSummary> {
        match self.state {
            SimState::NotSetup => return Err(SimError::NotSetup),
            SimState::Done     => return Err(SimError::Finished(self.config.ticks)),
            SimState::Ready | SimState::Ticking => {}
        }
        self.validate()?;

        let now = self.current_tick;
        let World { population, graph, interventions, order } =
            self.world.as_mut().ok_or(SimError::NotSetup)?;
        self.rng.shuffle(order);

        let mut summary = TickSummary::default();

        // ── Interventions ─────────────────────────────────────────────────
        for intv in interventions.iter_mut() {
            let setup = intv.is_setup_phase(now);
            let active = intv.is_active_phase(now);
            if !setup && !active {
                continue;
            }

            let mut ctx = InterventionContext::new(
                now,
                population,
                graph,
                &mut self.rng,
                &self.config.sui_ors,
                order.as_slice(),
            );

            if setup {
                intv.setup(&mut ctx)?;
                debug!(
                    tick     = now.0,
                    kind     = %intv.kind(),
                    enrolled = intv.state().enrolled_names().map_or(0, <[String]>::len),
                    targeted = ?intv.state().targeted_behaviors(),
                    "intervention set up"
                );
            }

            if active {
                let p_rewire = intv.state().params().p_rewire;
                if intv.kind() == InterventionKind::Network
                    && p_rewire > 0.0
                    && ctx.graph.edge_count() > 0
                    && ctx.graph.edge_count() == ctx.graph.max_edge_count()
                {
                    warn!(tick = now.0, "graph is complete; rewiring finds no free vertex pair");
                }

                let effect = intv.intervene(&mut ctx)?;
                summary.active_interventions += 1;
                debug!(
                    tick     = now.0,
                    kind     = %intv.kind(),
                    improved = effect.behaviors_improved,
                    rewired  = effect.edges_rewired,
                    removed  = effect.edges_removed,
                    "intervention applied"
                );
            }
        }

        // ── Agent pipeline ────────────────────────────────────────────────
        let c = &self.config;
        for &who in order.iter() {
            population.emulate_from_neighborhood(who, graph, c.p_emul, &mut self.rng)?;
            summary.pruned += population.prune_alters(who, graph, c.sim_thresh)?;
            summary.recruited += population.recruit_alters(who, graph, c.sim_thresh)?;

            let agent = population.get_mut(who);
            agent.spontaneous_change(&c.baserates, c.p_spon_change, &mut self.rng)?;
            if agent.consider_attempt(&self.risk, &mut self.rng)? {
                summary.attempts += 1;
            }
        }

        self.validate()?;

        let next = now.next();
        self.record(next)?;
        self.current_tick = next;
        self.state = if next >= self.config.end_tick() {
            SimState::Done
        } else {
            SimState::Ticking
        };

        debug!(
            tick      = now.0,
            attempts  = summary.attempts,
            recruited = summary.recruited,
            pruned    = summary.pruned,
            "tick complete"
        );
        Ok(summary)
    }

    /// Set up if needed and tick until `current_tick == ticks`.
    pub fn go(&mut self) -> SimResult<()> {
        self.run(&mut NoopObserver)
    }

    /// Like [`go`][Self::go] with observer callbacks at every tick boundary
    /// and for every recorded snapshot.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        if self.state == SimState::NotSetup {
            self.setup()?;
        }
        if self.state == SimState::Ready {
            if let Some(snapshot) = self.history.last() {
                observer.on_snapshot(snapshot);
            }
        }

        while self.current_tick < self.config.end_tick() {
            let now = self.current_tick;
            observer.on_tick_start(now);
            let summary = self.tick()?;
            observer.on_tick_end(now, &summary);
            if let Some(snapshot) = self.history.last() {
                observer.on_snapshot(snapshot);
            }
        }

        self.validate()?;
        observer.on_sim_end(self.current_tick);

        info!(
            run_id    = self.config.run_id,
            ticks     = self.current_tick.0,
            snapshots = self.history.len(),
            attempts  = self.history.last().map_or(0, TickSnapshot::total_attempts),
            "simulation complete"
        );
        Ok(())
    }

    // ── Validation ────────────────────────────────────────────────────────

    /// Check every structural invariant of the run:
    ///
    /// - agent names and vertex names are the same set;
    /// - every behavior vector has length `n_beh`;
    /// - every intervention window ends within the configured ticks.
    pub fn validate(&self) -> SimResult<()> {
        let world = self.world.as_ref().ok_or(SimError::NotSetup)?;
        let (population, graph) = (&world.population, &world.graph);

        if population.len() != graph.vertex_count() {
            return Err(invariant(format!(
                "{} agents but {} vertices",
                population.len(),
                graph.vertex_count()
            )));
        }
        if let Some(name) = population.names().find(|n| !graph.contains(n)) {
            return Err(invariant(format!("agent {name:?} has no vertex")));
        }

        let n_beh = self.config.n_beh;
        if let Some(a) = population.iter().find(|a| a.behavior.len() != n_beh) {
            return Err(invariant(format!(
                "agent {:?} has {} behaviors, expected {n_beh}",
                a.name,
                a.behavior.len()
            )));
        }
        if self.config.sui_ors.len() != n_beh {
            return Err(invariant(format!(
                "{} odds ratios for {n_beh} behaviors",
                self.config.sui_ors.len()
            )));
        }

        let end = self.config.end_tick();
        if let Some(intv) = world.interventions.iter().find(|i| i.state().last_tick() > end) {
            return Err(invariant(format!(
                "{} intervention window ends at {}, after {end}",
                intv.kind(),
                intv.state().last_tick()
            )));
        }
        Ok(())
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn record(&mut self, tick: Tick) -> SimResult<()> {
        let world = self.world.as_ref().ok_or(SimError::NotSetup)?;
        let snapshot = TickSnapshot::capture(
            self.config.run_id,
            tick,
            &world.population,
            &world.graph,
            &world.interventions,
            self.config.n_beh,
        );
        self.history.push(snapshot);
        Ok(())
    }
}

fn invariant(msg: String) -> SimError {
    SimError::Invariant(msg)
}
