//! Integration tests for rw-sim.

use std::collections::BTreeSet;

use rw_core::{
    AgentId, AlterCapacity, InterventionKind, InterventionParams, SeverityBand, SimConfig, Tick,
};
use rw_intervention::Policy;

use crate::{NoopObserver, SimError, SimObserver, SimState, Simulation, TickSnapshot, TickSummary};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn intervention(kind: InterventionKind, start: u64, duration: u64) -> InterventionParams {
    InterventionParams {
        kind,
        start_tick:   Tick(start),
        duration,
        tar_severity: SeverityBand::new(0.4, 1.0),
        p_rewire:     0.25,
        p_enrolled:   1.0,
        p_beh_change: 1.0,
    }
}

/// Ten agents, three behaviors, 30 ticks; Network on 15..=17 and
/// Individual on 20..=24.
fn reference_config() -> SimConfig {
    SimConfig {
        seed: 42,
        intervention_params: vec![
            intervention(InterventionKind::Network, 15, 3),
            intervention(InterventionKind::Individual, 20, 5),
        ],
        ..SimConfig::default()
    }
}

/// No emulation or spontaneous change: behaviors only move through
/// interventions.
fn frozen_config() -> SimConfig {
    SimConfig {
        ticks: 6,
        n_agents: 12,
        p_emul: 0.0,
        p_spon_change: 0.0,
        seed: 7,
        ..SimConfig::default()
    }
}

fn vertex_names(s: &TickSnapshot) -> BTreeSet<String> {
    s.vertices.iter().map(|v| v.name.clone()).collect()
}

fn edge_set(s: &TickSnapshot) -> BTreeSet<(String, String)> {
    s.edges.iter().map(|e| (e.source.clone(), e.target.clone())).collect()
}

fn total_active(s: &TickSnapshot) -> i64 {
    s.agents.iter().map(|a| a.behavior.iter().map(|&b| b as i64).sum::<i64>()).sum()
}

// ── Construction & lifecycle ──────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn invalid_config_rejected() {
        let zero_ticks = SimConfig { ticks: 0, ..SimConfig::default() };
        assert!(matches!(Simulation::new(zero_ticks), Err(SimError::Config(_))));

        let late = SimConfig {
            intervention_params: vec![intervention(InterventionKind::Network, 29, 3)],
            ..SimConfig::default()
        };
        assert!(matches!(Simulation::new(late), Err(SimError::Config(_))));

        let bad_or = SimConfig { sui_ors: vec![2.0, 0.0, 4.0], ..SimConfig::default() };
        assert!(matches!(Simulation::new(bad_or), Err(SimError::Config(_))));
    }

    #[test]
    fn window_ending_on_last_tick_accepted() {
        let config = SimConfig {
            intervention_params: vec![intervention(InterventionKind::MockA, 28, 3)],
            ..SimConfig::default()
        };
        assert!(Simulation::new(config).is_ok());
    }

    #[test]
    fn window_reaching_end_never_sets_up_on_final_tick() {
        let config = SimConfig {
            ticks: 5,
            intervention_params: vec![intervention(InterventionKind::Network, 5, 1)],
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.go().unwrap();
        assert_eq!(sim.history().len(), 6);
        assert!(!sim.interventions()[0].state().is_setup());
    }

    #[test]
    fn renamed_agent_aborts_tick() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        sim.setup().unwrap();
        sim.population_mut().unwrap().get_mut(AgentId(0)).name = "stranger".to_owned();

        assert!(matches!(sim.validate(), Err(SimError::Invariant(_))));
        assert!(matches!(sim.tick(), Err(SimError::Invariant(_))));
        assert_eq!(sim.current_tick(), Tick::ZERO);
        assert_eq!(sim.history().len(), 1);
    }

    #[test]
    fn short_behavior_vector_aborts_tick() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        sim.setup().unwrap();
        sim.tick().unwrap();
        sim.population_mut().unwrap().get_mut(AgentId(3)).behavior.pop();

        let err = sim.tick().unwrap_err();
        assert!(matches!(err, SimError::Invariant(ref msg) if msg.contains("id_3")), "{err}");
        assert_eq!(sim.current_tick(), Tick(1));
        assert_eq!(sim.history().len(), 2);
        assert!(matches!(sim.go(), Err(SimError::Invariant(_))));
    }

    #[test]
    fn tick_requires_setup() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        assert_eq!(sim.state(), SimState::NotSetup);
        assert!(matches!(sim.tick(), Err(SimError::NotSetup)));
        assert!(matches!(sim.validate(), Err(SimError::NotSetup)));
        assert!(sim.history().is_empty());
        assert!(sim.interventions().is_empty());
    }

    #[test]
    fn setup_once() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        sim.setup().unwrap();
        assert_eq!(sim.state(), SimState::Ready);
        assert!(matches!(sim.setup(), Err(SimError::AlreadySetup)));
    }

    #[test]
    fn setup_binds_agents_to_vertices() {
        let mut sim = Simulation::new(reference_config()).unwrap();
        sim.setup().unwrap();

        let history = sim.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].tick, Tick::ZERO);
        assert_eq!(history[0].agents.len(), 10);
        assert_eq!(history[0].vertices.len(), 10);

        let agents: BTreeSet<String> = history[0].agents.iter().map(|a| a.name.clone()).collect();
        assert_eq!(agents, vertex_names(&history[0]));
        assert!(history[0].agents.iter().all(|a| a.behavior.len() == 3 && a.attempts == 0));
        assert_eq!(sim.interventions().len(), 2);
        sim.validate().unwrap();
    }

    #[test]
    fn remaining_ticks_counts_down() {
        let mut sim = Simulation::new(SimConfig { ticks: 4, ..SimConfig::default() }).unwrap();
        sim.setup().unwrap();
        assert_eq!(sim.remaining_ticks(), 4);
        sim.tick().unwrap();
        sim.tick().unwrap();
        assert_eq!(sim.remaining_ticks(), 2);
        assert_eq!(sim.current_tick(), Tick(2));
        assert_eq!(sim.state(), SimState::Ticking);
    }

    #[test]
    fn tick_after_last_fails() {
        let mut sim = Simulation::new(SimConfig { ticks: 2, ..SimConfig::default() }).unwrap();
        sim.go().unwrap();
        assert_eq!(sim.state(), SimState::Done);
        assert_eq!(sim.remaining_ticks(), 0);
        assert!(matches!(sim.tick(), Err(SimError::Finished(2))));
        // State is still valid.
        sim.validate().unwrap();
    }

    #[test]
    fn go_after_manual_ticks_finishes_run() {
        let mut sim = Simulation::new(SimConfig { ticks: 5, ..SimConfig::default() }).unwrap();
        sim.setup().unwrap();
        sim.tick().unwrap();
        sim.go().unwrap();
        assert_eq!(sim.current_tick(), Tick(5));
        assert_eq!(sim.history().len(), 6);
    }
}

// ── Alter capacity ────────────────────────────────────────────────────────────

#[cfg(test)]
mod capacity_tests {
    use super::*;

    #[test]
    fn initial_degree_capacity() {
        let config = SimConfig { alter_capacity: AlterCapacity::InitialDegree, seed: 3, ..SimConfig::default() };
        let mut sim = Simulation::new(config).unwrap();
        sim.setup().unwrap();

        let graph = sim.graph().unwrap();
        for agent in sim.population().unwrap().iter() {
            assert_eq!(agent.max_alters, Some(graph.degree(&agent.name).unwrap()));
        }
    }

    #[test]
    fn fixed_capacity_bounds_recruiting() {
        // Everyone similar to everyone: recruiting fills up to the cap.
        let config = SimConfig {
            n_agents: 12,
            p_edge: 0.0,
            sim_thresh: 0.0,
            alter_capacity: AlterCapacity::Fixed(2),
            seed: 4,
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.setup().unwrap();
        sim.tick().unwrap();

        let pop = sim.population().unwrap();
        assert!(pop.iter().all(|a| a.max_alters == Some(2)));
        // Each agent recruits at most 2; later agents may also be recruited by
        // others, so only the per-agent recruit count is bounded.
        assert!(pop.iter().all(|a| a.diagnostics.recruited_alters <= 2));
        assert!(sim.graph().unwrap().edge_count() > 0);
    }
}

// ── End-to-end ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn reference_scenario() {
        let mut sim = Simulation::new(reference_config()).unwrap();
        sim.setup().unwrap();
        sim.go().unwrap();

        let history = sim.history();
        assert_eq!(history.len(), 31);
        for (k, snapshot) in history.iter().enumerate() {
            assert_eq!(snapshot.tick, Tick(k as u64));
            assert_eq!(vertex_names(snapshot), vertex_names(&history[0]));
            assert!(snapshot.agents.iter().all(|a| a.behavior.len() == 3));
        }

        let first_beh: Vec<_> = history[0].agents.iter().map(|a| a.behavior.clone()).collect();
        let last_beh: Vec<_> = history[30].agents.iter().map(|a| a.behavior.clone()).collect();
        assert_ne!(first_beh, last_beh, "some behavior changed");
        assert_ne!(edge_set(&history[0]), edge_set(&history[30]), "some edge changed");

        let intvs = &history[30].interventions;
        assert_eq!(intvs.len(), 2);
        assert_eq!(intvs[0].kind, InterventionKind::Network);
        assert_eq!(intvs[0].last_tick, Tick(17));
        assert_eq!(intvs[0].enrolled, 10);
        assert_eq!(intvs[1].kind, InterventionKind::Individual);
        assert_eq!(intvs[1].last_tick, Tick(24));
        assert_eq!(intvs[1].enrolled, 10);

        // Nobody enrolled before the first start tick; everybody after.
        assert!(history[15].agents.iter().all(|a| !a.enrolled));
        assert!(history[16].agents.iter().all(|a| a.enrolled));
    }

    #[test]
    fn same_seed_same_history() {
        let a = crate::run_one(reference_config()).unwrap();
        let b = crate::run_one(reference_config()).unwrap();
        assert_eq!(a, b);

        let other = crate::run_one(SimConfig { run_id: 1, ..reference_config() }).unwrap();
        assert_ne!(a, other);
        assert!(other.iter().all(|s| s.run_id == 1));
    }

    #[test]
    fn network_intervention_clears_targeted_behaviors() {
        let config = SimConfig {
            intervention_params: vec![InterventionParams {
                tar_severity: SeverityBand::new(0.0, 1.0),
                p_rewire: 0.0,
                ..intervention(InterventionKind::Network, 2, 1)
            }],
            ..frozen_config()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.go().unwrap();
        let h = sim.history();

        // Snapshot k is the state after tick k-1, so the tick-2 intervention
        // shows up in snapshot 3.
        assert_eq!(total_active(&h[0]), total_active(&h[2]));
        assert_eq!(total_active(&h[3]), 0);
        assert_eq!(total_active(&h[6]), 0);
        assert_eq!(h[3].interventions[0].behaviors_improved, total_active(&h[2]));
        assert_eq!(h[2].interventions[0].behaviors_improved, 0);
    }

    #[test]
    fn individual_intervention_spares_graph() {
        let config = SimConfig {
            sim_thresh: 0.0,
            p_edge: 1.0,
            intervention_params: vec![intervention(InterventionKind::Individual, 1, 2)],
            ..frozen_config()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.go().unwrap();
        let h = sim.history();

        // Complete graph, nothing pruned, nothing to recruit.
        for s in h {
            assert_eq!(s.network.edge_count, 66);
        }
        assert!(total_active(&h[3]) <= total_active(&h[1]));
        assert!(h[6].interventions[0].behaviors_improved >= 0);
    }

    #[test]
    fn snapshot_serializes_history_field_names() {
        let mut sim = Simulation::new(SimConfig { ticks: 1, ..reference_config_without_interventions() }).unwrap();
        sim.go().unwrap();

        let value = serde_json::to_value(&sim.history()[1]).unwrap();
        let agent = &value["agents"][0];
        for key in ["id", "name", "beh", "cur_risk", "attempt_count", "cur_attempt", "enrolled"] {
            assert!(agent.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["tick"], 1);
        assert!(value["network"]["density"].is_number());
        if let Some(edge) = value["edges"].get(0) {
            assert!(edge.get("src_name").is_some() && edge.get("tar_name").is_some());
        }
    }

    fn reference_config_without_interventions() -> SimConfig {
        SimConfig { intervention_params: Vec::new(), ..reference_config() }
    }

    #[test]
    fn network_stats_in_range() {
        let history = crate::run_one(reference_config()).unwrap();
        for s in &history {
            assert!((0.0..=1.0).contains(&s.network.density));
            assert_eq!(s.network.edge_count, s.edges.len());
            assert_eq!(s.network.beh_assortativity.len(), 3);
            for r in s.network.beh_assortativity.iter().flatten() {
                assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(r));
            }
        }
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        starts:    Vec<Tick>,
        ends:      Vec<Tick>,
        snapshots: Vec<Tick>,
        attempts:  usize,
        finished:  Option<Tick>,
    }

    impl SimObserver for Recorder {
        fn on_tick_start(&mut self, tick: Tick) {
            self.starts.push(tick);
        }
        fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
            self.ends.push(tick);
            self.attempts += summary.attempts;
        }
        fn on_snapshot(&mut self, snapshot: &TickSnapshot) {
            self.snapshots.push(snapshot.tick);
        }
        fn on_sim_end(&mut self, final_tick: Tick) {
            self.finished = Some(final_tick);
        }
    }

    #[test]
    fn hooks_fire_in_order() {
        let mut sim = Simulation::new(SimConfig { ticks: 5, ..SimConfig::default() }).unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.starts, (0..5).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.ends, rec.starts);
        assert_eq!(rec.snapshots, (0..=5).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.finished, Some(Tick(5)));
        assert_eq!(rec.attempts as u64, sim.history()[5].total_attempts());
    }

    #[test]
    fn noop_observer_runs() {
        let mut sim = Simulation::new(SimConfig { ticks: 3, ..SimConfig::default() }).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.history().len(), 4);
    }
}

// ── Batch ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod batch_tests {
    use super::*;
    use crate::{replicate, run_batch};

    #[test]
    fn replicate_assigns_run_ids() {
        let configs = replicate(&reference_config(), 3);
        assert_eq!(configs.iter().map(|c| c.run_id).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(configs.iter().all(|c| c.seed == 42));
    }

    #[test]
    fn batch_runs_every_config() {
        let mut configs = replicate(&SimConfig { ticks: 4, ..SimConfig::default() }, 3);
        configs.push(SimConfig { ticks: 0, ..SimConfig::default() });

        let results = run_batch(configs);
        assert_eq!(results.len(), 4);
        for (i, result) in results.iter().take(3).enumerate() {
            let history = result.as_ref().unwrap();
            assert_eq!(history.len(), 5);
            assert_eq!(history[0].run_id, i as u64);
        }
        assert!(matches!(results[3], Err(SimError::Config(_))));
    }
}
