//! Independent runs over many configurations.
//!
//! Runs share nothing, so with the `parallel` feature each one goes to
//! Rayon's thread pool.  Results come back in input order either way.

use rw_core::SimConfig;

use crate::{SimResult, Simulation, TickSnapshot};

/// Set up, run to completion, and return the history of one configuration.
pub fn run_one(config: SimConfig) -> SimResult<Vec<TickSnapshot>> {
    let mut sim = Simulation::new(config)?;
    sim.go()?;
    Ok(sim.into_history())
}

/// `n` copies of `base` with `run_id` set to `0..n`.  Each copy draws from
/// its own RNG stream because the stream is derived from seed and run id.
pub fn replicate(base: &SimConfig, n: u64) -> Vec<SimConfig> {
    (0..n)
        .map(|run_id| SimConfig { run_id, ..base.clone() })
        .collect()
}

/// Run every configuration.  One failed run does not stop the others.
pub fn run_batch(configs: Vec<SimConfig>) -> Vec<SimResult<Vec<TickSnapshot>>> {
    #[cfg(not(feature = "parallel"))]
    {
        configs.into_iter().map(run_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        configs.into_par_iter().map(run_one).collect()
    }
}
