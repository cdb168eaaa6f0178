//! `rw-agent` — agents and the rules they follow each tick.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`agent`]      | `Agent`, `TickDiagnostics`, self-contained rules              |
//! | [`population`] | `Population` — id- and name-indexed agent storage             |
//! | [`behavior`]   | graph-aware rules: emulate, prune, recruit                    |
//! | [`risk`]       | `RiskModel` — logistic attempt risk                           |
//! | [`error`]      | `AgentError`, `AgentResult<T>`                                |
//!
//! # Design notes
//!
//! Rules that only touch one agent (`similarity`, `emulate_from`,
//! `spontaneous_change`, `suicide_risk`, `consider_attempt`) are methods on
//! [`Agent`].  Rules that read other agents or the graph are methods on
//! [`Population`] taking the acting agent's id, the graph, and the run's RNG
//! as explicit arguments.  Nothing holds a reference to the population or
//! graph between calls.
//!
//! Updates are applied in place: an agent processed later in a tick sees the
//! already-updated vectors of agents processed earlier.

pub mod agent;
pub mod behavior;
pub mod error;
pub mod population;
pub mod risk;


pub use agent::{Agent, TickDiagnostics};
pub use error::{AgentError, AgentResult};
pub use population::Population;
pub use risk::RiskModel;
