//! `rw-sim` — tick loop orchestrator for the riskweb simulator.
//!
//! # Tick loop
//!
//! ```text
//! setup():   G(n, p) graph → one agent per vertex → interventions → snapshot 0
//! tick():
//!   ① validate
//!   ② shuffle processing order
//!   ③ interventions — setup on start tick, intervene while active
//!   ④ agents in order — emulate → prune → recruit → spontaneous → attempt
//!   ⑤ validate → snapshot → advance
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | [`batch::run_batch`] runs on Rayon's thread pool.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rw_core::SimConfig;
//! use rw_sim::{NoopObserver, Simulation};
//!
//! let mut sim = Simulation::new(SimConfig::default())?;
//! sim.setup()?;
//! sim.run(&mut NoopObserver)?;
//! assert_eq!(sim.history().len(), 31);
//! ```

pub mod batch;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use batch::{replicate, run_batch, run_one};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use sim::{SimState, Simulation};
pub use snapshot::{
    AgentRecord, EdgeRecord, InterventionRecord, NetworkStats, TickSnapshot, VertexRecord,
};
