//! `rw-graph` — the social graph agents live on.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`graph`]    | `SocialGraph` (name-keyed adjacency), `SocialGraphBuilder` |
//! | [`generate`] | `erdos_renyi`                                              |
//! | [`rewire`]   | random rewiring and random edge deletion                   |
//! | [`stats`]    | density and trait assortativity                            |
//! | [`error`]    | `GraphError`, `GraphResult<T>`                             |
//!
//! Every public operation takes vertex *names*.  Positions (`VertexId`) are
//! an internal detail resolved through a name index on each call.

pub mod error;
pub mod generate;
pub mod graph;
pub mod rewire;
pub mod stats;


pub use error::{GraphError, GraphResult};
pub use generate::erdos_renyi;
pub use graph::{SocialGraph, SocialGraphBuilder};
