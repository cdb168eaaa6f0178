//! Social graph representation and builder.
//!
//! # Data layout
//!
//! Vertices are stored by position (`VertexId`); each position owns its name
//! and an ordered neighbor set:
//!
//! ```text
//! names[v]      : String
//! adjacency[v]  : BTreeSet<VertexId>   (symmetric: u ∈ adj[v] ⇔ v ∈ adj[u])
//! index[name]   : VertexId
//! ```
//!
//! Ordered sets keep neighbor and edge iteration deterministic, which the
//! per-run RNG relies on for reproducibility.
//!
//! The vertex set is fixed once the graph is built; only edges change.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use rw_core::VertexId;

use crate::{GraphError, GraphResult};

// ── SocialGraph ───────────────────────────────────────────────────────────────

/// Undirected simple graph over a fixed set of named vertices.
///
/// No self-loops, no parallel edges.  Construct with [`SocialGraphBuilder`]
/// or [`erdos_renyi`][crate::erdos_renyi].
#[derive(Clone, Debug)]
pub struct SocialGraph {
    names:      Vec<String>,
    index:      FxHashMap<String, VertexId>,
    adjacency:  Vec<BTreeSet<VertexId>>,
    edge_count: usize,
}

impl SocialGraph {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of vertex pairs; the edge count of the complete graph.
    pub fn max_edge_count(&self) -> usize {
        let n = self.vertex_count();
        n * n.saturating_sub(1) / 2
    }

    // ── Vertex lookup ─────────────────────────────────────────────────────

    /// `true` if a vertex called `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All vertex names in storage order.
    pub fn vertex_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    // ── Neighborhood queries ──────────────────────────────────────────────

    /// Names of all vertices adjacent to `name`.
    pub fn neighbors(&self, name: &str) -> GraphResult<Vec<&str>> {
        let v = self.resolve(name)?;
        Ok(self.adjacency[v.index()]
            .iter()
            .map(|&u| self.name_of(u))
            .collect())
    }

    pub fn degree(&self, name: &str) -> GraphResult<usize> {
        let v = self.resolve(name)?;
        Ok(self.adjacency[v.index()].len())
    }

    pub fn has_edge(&self, a: &str, b: &str) -> GraphResult<bool> {
        let u = self.resolve(a)?;
        let v = self.resolve(b)?;
        Ok(self.adjacency[u.index()].contains(&v))
    }

    /// Every edge once, as `(lower-position name, higher-position name)`,
    /// in ascending position order.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.edge_positions()
            .into_iter()
            .map(|(u, v)| (self.name_of(u), self.name_of(v)))
            .collect()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Connect `a` and `b`.
    ///
    /// Returns `Ok(true)` if the edge was new and `Ok(false)` if it already
    /// existed.  A self-loop is an error.
    pub fn add_edge(&mut self, a: &str, b: &str) -> GraphResult<bool> {
        let u = self.resolve(a)?;
        let v = self.resolve(b)?;
        if u == v {
            return Err(GraphError::SelfLoop(a.to_owned()));
        }
        Ok(self.link(u, v))
    }

    /// Disconnect `a` and `b`.
    ///
    /// Returns `Ok(true)` if an edge was removed and `Ok(false)` if there was
    /// none.
    pub fn remove_edge(&mut self, a: &str, b: &str) -> GraphResult<bool> {
        let u = self.resolve(a)?;
        let v = self.resolve(b)?;
        Ok(self.unlink(u, v))
    }

    // ── Crate-internal positional access ──────────────────────────────────

    pub(crate) fn resolve(&self, name: &str) -> GraphResult<VertexId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(name.to_owned()))
    }

    #[inline]
    pub(crate) fn name_of(&self, v: VertexId) -> &str {
        &self.names[v.index()]
    }

    #[inline]
    pub(crate) fn is_linked(&self, u: VertexId, v: VertexId) -> bool {
        self.adjacency[u.index()].contains(&v)
    }

    pub(crate) fn link(&mut self, u: VertexId, v: VertexId) -> bool {
        debug_assert_ne!(u, v);
        let inserted = self.adjacency[u.index()].insert(v);
        if inserted {
            self.adjacency[v.index()].insert(u);
            self.edge_count += 1;
        }
        inserted
    }

    pub(crate) fn unlink(&mut self, u: VertexId, v: VertexId) -> bool {
        let removed = self.adjacency[u.index()].remove(&v);
        if removed {
            self.adjacency[v.index()].remove(&u);
            self.edge_count -= 1;
        }
        removed
    }

    pub(crate) fn edge_positions(&self) -> Vec<(VertexId, VertexId)> {
        let mut out = Vec::with_capacity(self.edge_count);
        for (i, adj) in self.adjacency.iter().enumerate() {
            let u = VertexId(i as u32);
            out.extend(adj.range(VertexId(u.0 + 1)..).map(|&v| (u, v)));
        }
        out
    }
}

// ── SocialGraphBuilder ────────────────────────────────────────────────────────

/// Construct a [`SocialGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use rw_graph::SocialGraphBuilder;
///
/// let mut b = SocialGraphBuilder::new();
/// let a = b.add_vertex("id_0");
/// let c = b.add_vertex("id_1");
/// b.add_edge(a, c);
/// let g = b.build().unwrap();
/// assert_eq!(g.vertex_count(), 2);
/// assert_eq!(g.edge_count(), 1);
/// ```
#[derive(Default)]
pub struct SocialGraphBuilder {
    names: Vec<String>,
    edges: Vec<(VertexId, VertexId)>,
}

impl SocialGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            names: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(edges),
        }
    }

    /// Add a vertex and return its position (sequential from 0).
    pub fn add_vertex(&mut self, name: impl Into<String>) -> VertexId {
        let id = VertexId(self.names.len() as u32);
        self.names.push(name.into());
        id
    }

    /// Add an undirected edge between two positions returned by
    /// [`add_vertex`](Self::add_vertex).  Self-loops and repeats are dropped
    /// at build time.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) {
        self.edges.push((a, b));
    }

    pub fn vertex_count(&self) -> usize {
        self.names.len()
    }

    /// Consume the builder and produce a [`SocialGraph`].
    ///
    /// Fails if two vertices share a name or an edge references a position
    /// that was never added.
    pub fn build(self) -> GraphResult<SocialGraph> {
        let n = self.names.len();
        let mut index = FxHashMap::with_capacity_and_hasher(n, Default::default());
        for (i, name) in self.names.iter().enumerate() {
            if index.insert(name.clone(), VertexId(i as u32)).is_some() {
                return Err(GraphError::DuplicateVertex(name.clone()));
            }
        }

        let mut graph = SocialGraph {
            names:      self.names,
            index,
            adjacency:  vec![BTreeSet::new(); n],
            edge_count: 0,
        };

        for (a, b) in self.edges {
            for v in [a, b] {
                if v.index() >= n {
                    return Err(GraphError::UnknownVertex(v.to_string()));
                }
            }
            if a != b {
                graph.link(a, b);
            }
        }

        Ok(graph)
    }
}
