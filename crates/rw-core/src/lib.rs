//! `rw-core` — foundational types for the `riskweb` contagion simulator.
//!
//! This crate is a dependency of every other `rw-*` crate.  It has no `rw-*`
//! dependencies and only a handful of external ones (`rand`, `thiserror`,
//! `serde`, `serde_json`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `VertexId`                                      |
//! | [`time`]        | `Tick`                                                     |
//! | [`rng`]         | `SimRng` (one per run)                                     |
//! | [`config`]      | `SimConfig`, `InterventionParams`, `InterventionKind`, ... |
//! | [`error`]       | `RwError`, `RwResult`                                      |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AlterCapacity, InterventionKind, InterventionParams, SeverityBand, SimConfig};
pub use error::{RwError, RwResult};
pub use ids::{AgentId, VertexId};
pub use rng::SimRng;
pub use time::Tick;
