//! Typed identifiers.
//!
//! Both ids are plain `u32` positions with `Copy + Ord + Hash`, so they sort
//! and key maps without ceremony.  `index()` turns one into a `Vec` index.
//!
//! `VertexId` is a *position* inside a `SocialGraph` and is only meaningful to
//! the graph that issued it.  Anything that crosses the agent/graph boundary
//! is keyed by name instead.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub u32);

        impl $name {
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of an agent in a `Population`.  Stable for the whole run.
    pub struct AgentId;
}

typed_id! {
    /// Position of a vertex inside one `SocialGraph`.
    pub struct VertexId;
}

impl AgentId {
    /// The graph key bound to this agent at setup: `id_<n>`.
    pub fn default_name(self) -> String {
        format!("id_{}", self.0)
    }
}
