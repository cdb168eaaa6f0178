//! Unit tests for rw-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, VertexId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VertexId(3).index(), 3);
        assert!(AgentId(1) < AgentId(2));
    }

    #[test]
    fn display_and_name() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(AgentId(7).default_name(), "id_7");
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(t.next(), Tick(11));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(15).since(Tick(12)), 3);
    }

    #[test]
    fn display() {
        assert_eq!(Tick(3).to_string(), "T3");
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(99);
        let mut b = SimRng::new(99);
        let xs: Vec<u64> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn run_ids_decorrelate_streams() {
        let mut a = SimRng::for_run(1, 0);
        let mut b = SimRng::for_run(1, 1);
        let xs: Vec<u64> = (0..4).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..4).map(|_| b.random()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn gen_bool_extremes_and_clamping() {
        let mut rng = SimRng::new(1);
        for _ in 0..100 {
            assert!(!rng.gen_bool(0.0));
            assert!(rng.gen_bool(1.0));
            assert!(rng.gen_bool(7.5));
            assert!(!rng.gen_bool(-1.0));
        }
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(1);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[5]), Some(&5));
    }

    #[test]
    fn shuffle_is_permutation() {
        let mut rng = SimRng::new(5);
        let mut v: Vec<u32> = (0..50).collect();
        rng.shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }
}

#[cfg(test)]
mod config {
    use crate::{AlterCapacity, InterventionKind, RwError, SeverityBand, SimConfig, Tick};

    const REFERENCE_JSON: &str = r#"{
        "ticks": 30, "n_agents": 10, "n_beh": 3,
        "p_edge": 0.5, "p_emul": 0.5, "p_spon_change": 0.5, "sim_thresh": 0.5,
        "gen_sui_prev": 0.01, "gen_ave_beh": 0,
        "baserates": [0.5, 0.5, 0.5], "sui_ORs": [2, 3, 4],
        "intervention_params": [
            { "type": "Network", "start_tick": 15, "duration": 3,
              "tar_severity": [0.4, 1.0], "p_rewire": 0.25,
              "p_enrolled": 1.0, "p_beh_change": 1.0 },
            { "intv_class_name": "IndividualIntervention", "start_tick": 20, "duration": 5,
              "tar_severity": [0.4, 1.0], "p_rewire": 0.25,
              "p_enrolled": 1.0, "p_beh_change": 1.0 }
        ]
    }"#;

    #[test]
    fn parses_reference_scenario() {
        let cfg = SimConfig::from_json_str(REFERENCE_JSON).unwrap();
        assert_eq!(cfg.ticks, 30);
        assert_eq!(cfg.sui_ors, vec![2.0, 3.0, 4.0]);
        assert_eq!(cfg.intervention_params.len(), 2);
        assert_eq!(cfg.intervention_params[0].kind, InterventionKind::Network);
        assert_eq!(cfg.intervention_params[1].kind, InterventionKind::Individual);
        assert_eq!(cfg.intervention_params[0].last_tick(), Tick(17));
        assert_eq!(cfg.intervention_params[1].last_tick(), Tick(24));
        assert_eq!(cfg.intervention_params[0].tar_severity, SeverityBand::new(0.4, 1.0));
        assert_eq!(cfg.alter_capacity, AlterCapacity::Unbounded);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = SimConfig::from_json_str(r#"{ "ticks": 5, "seed": 9 }"#).unwrap();
        assert_eq!(cfg.ticks, 5);
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.n_agents, SimConfig::default().n_agents);
    }

    #[test]
    fn unknown_fields_rejected() {
        let err = SimConfig::from_json_str(r#"{ "ticks": 5, "n_interactions": 3 }"#).unwrap_err();
        assert!(matches!(err, RwError::Parse(_)));
    }

    #[test]
    fn alter_capacity_forms() {
        let cfg = SimConfig::from_json_str(r#"{ "alter_capacity": "initial_degree" }"#).unwrap();
        assert_eq!(cfg.alter_capacity, AlterCapacity::InitialDegree);
        let cfg = SimConfig::from_json_str(r#"{ "alter_capacity": { "fixed": 4 } }"#).unwrap();
        assert_eq!(cfg.alter_capacity, AlterCapacity::Fixed(4));
    }

    #[test]
    fn default_is_valid() {
        SimConfig::default().validate().unwrap();
    }

    fn assert_config_err(cfg: SimConfig) {
        assert!(matches!(cfg.validate(), Err(RwError::Config(_))), "{cfg:?}");
    }

    #[test]
    fn prevalence_domain() {
        for prev in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert_config_err(SimConfig { gen_sui_prev: prev, ..SimConfig::default() });
        }
    }

    #[test]
    fn odds_ratio_domain() {
        assert_config_err(SimConfig { sui_ors: vec![2.0, 0.0, 4.0], ..SimConfig::default() });
        assert_config_err(SimConfig { sui_ors: vec![2.0, -1.0, 4.0], ..SimConfig::default() });
        assert_config_err(SimConfig { sui_ors: vec![2.0, 3.0], ..SimConfig::default() });
    }

    #[test]
    fn probabilities_checked() {
        assert_config_err(SimConfig { p_edge: 1.2, ..SimConfig::default() });
        assert_config_err(SimConfig { p_emul: -0.2, ..SimConfig::default() });
        assert_config_err(SimConfig { baserates: vec![0.5, 2.0, 0.5], ..SimConfig::default() });
        assert_config_err(SimConfig { baserates: vec![0.5], ..SimConfig::default() });
    }

    #[test]
    fn intervention_window_must_fit() {
        let mut cfg = SimConfig::from_json_str(REFERENCE_JSON).unwrap();
        cfg.intervention_params[1].duration = 20;
        assert_config_err(cfg.clone());

        // last_tick == ticks is allowed.
        cfg.intervention_params[1].start_tick = Tick(30);
        cfg.intervention_params[1].duration = 1;
        cfg.validate().unwrap();

        cfg.intervention_params[1].duration = 0;
        assert_config_err(cfg);
    }

    #[test]
    fn overflowing_window_rejected() {
        let json = r#"{"intervention_params":[{"type":"Network",
            "start_tick":18446744073709551615,"duration":2,
            "p_enrolled":1.0,"p_beh_change":1.0}]}"#;
        assert!(matches!(SimConfig::from_json_str(json), Err(RwError::Config(_))));

        let mut cfg = SimConfig::from_json_str(REFERENCE_JSON).unwrap();
        cfg.intervention_params[0].start_tick = Tick(u64::MAX);
        cfg.intervention_params[0].duration = u64::MAX;
        assert_eq!(cfg.intervention_params[0].last_tick(), Tick(u64::MAX - 1));
        assert_config_err(cfg);
    }

    #[test]
    fn severity_band_checked() {
        let mut cfg = SimConfig::from_json_str(REFERENCE_JSON).unwrap();
        cfg.intervention_params[0].tar_severity = SeverityBand::new(0.8, 0.2);
        assert_config_err(cfg);
    }

    #[test]
    fn severity_ranks_round_half_to_even() {
        assert_eq!(SeverityBand::new(0.5, 0.75).ranks(8), (4, 6));
        assert_eq!(SeverityBand::new(0.33, 1.0).ranks(4), (1, 4));
        assert_eq!(SeverityBand::new(0.5, 1.0).ranks(5), (2, 5));
        assert_eq!(SeverityBand::new(0.4, 1.0).ranks(3), (1, 3));
    }
}
