//! `rw-intervention` — timed public-health interventions.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                        |
//! |------------------|-----------------------------------------------------------------|
//! | [`policy`]       | `Policy` trait (`setup`, `intervene`, phase queries)            |
//! | [`intervention`] | `Intervention` closed enum, built from `InterventionParams`     |
//! | [`network`]      | `NetworkIntervention` — rewire + treat a fixed behavior band    |
//! | [`individual`]   | `IndividualIntervention` — treat top-risk agents individually   |
//! | [`mock`]         | `MockA`, `MockB` — vector resets, B also deletes edges          |
//! | [`state`]        | `InterventionState`, `Phase`, `Effect`                          |
//! | [`targeting`]    | ranking helpers (`target_behaviors`, `prioritize_agents`, ...)  |
//! | [`context`]      | `InterventionContext<'a>` — borrowed world state for one call   |
//! | [`error`]        | `InterventionError`, `InterventionResult<T>`                    |
//!
//! # Lifecycle
//!
//! ```text
//! Pending ──(t == start_tick: setup)──► Active ──(t > last_tick)──► Expired
//! ```
//!
//! The enrollment is captured once at setup and stored by agent name; every
//! `intervene` call resolves the names against the current population.

pub mod context;
pub mod error;
pub mod individual;
pub mod intervention;
pub mod mock;
pub mod network;
pub mod policy;
pub mod state;
pub mod targeting;


pub use context::InterventionContext;
pub use error::{InterventionError, InterventionResult};
pub use individual::IndividualIntervention;
pub use intervention::Intervention;
pub use mock::{MockA, MockB};
pub use network::NetworkIntervention;
pub use policy::Policy;
pub use state::{Effect, InterventionState, Phase};
