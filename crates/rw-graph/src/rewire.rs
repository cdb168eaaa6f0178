//! Random structural perturbation of a [`SocialGraph`].
//!
//! Both operations take a snapshot of the edge list first and visit each
//! snapshot edge exactly once, so edges created during the pass are never
//! revisited.

use rw_core::{SimRng, VertexId};

use crate::SocialGraph;

/// Rejection-sampling attempts before falling back to enumerating free pairs.
const MAX_PAIR_ATTEMPTS: usize = 64;

impl SocialGraph {
    /// With probability `p` per edge, replace the edge by one between a
    /// uniformly random unconnected vertex pair.
    ///
    /// The edge count is preserved.  If the graph is complete no free pair
    /// exists and every edge is kept.  Returns the number of edges rewired.
    pub fn rewire_edges(&mut self, p: f64, rng: &mut SimRng) -> usize {
        let mut rewired = 0;
        for (a, b) in self.edge_positions() {
            if !rng.gen_bool(p) {
                continue;
            }
            // Chosen while (a, b) is still present, so the edge always moves.
            let Some((u, v)) = self.random_free_pair(rng) else {
                continue;
            };
            self.unlink(a, b);
            self.link(u, v);
            rewired += 1;
        }
        rewired
    }

    /// Delete each edge independently with probability `p`.  Returns the
    /// number of edges deleted.
    pub fn delete_random_edges(&mut self, p: f64, rng: &mut SimRng) -> usize {
        let mut deleted = 0;
        for (a, b) in self.edge_positions() {
            if rng.gen_bool(p) && self.unlink(a, b) {
                deleted += 1;
            }
        }
        deleted
    }

    /// A uniformly random pair `(u, v)`, `u != v`, with no edge between them.
    fn random_free_pair(&self, rng: &mut SimRng) -> Option<(VertexId, VertexId)> {
        let n = self.vertex_count();
        if self.edge_count() >= self.max_edge_count() {
            return None;
        }

        for _ in 0..MAX_PAIR_ATTEMPTS {
            let u = VertexId(rng.gen_range(0..n as u32));
            let v = VertexId(rng.gen_range(0..n as u32));
            if u != v && !self.is_linked(u, v) {
                return Some((u, v));
            }
        }

        // Dense graph: enumerate what is left.
        let free: Vec<(VertexId, VertexId)> = (0..n as u32)
            .flat_map(|i| ((i + 1)..n as u32).map(move |j| (VertexId(i), VertexId(j))))
            .filter(|&(u, v)| !self.is_linked(u, v))
            .collect();
        rng.choose(&free).copied()
    }
}
