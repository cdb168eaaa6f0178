//! Random graph generation.

use rw_core::{SimRng, VertexId};

use crate::{GraphResult, SocialGraph, SocialGraphBuilder};

/// G(n, p) random graph over `names`: every unordered vertex pair is joined
/// independently with probability `p_edge`.
///
/// Pairs are visited in ascending `(i, j)` order with `i < j`, one RNG draw
/// per pair, so the result depends only on the names, `p_edge`, and the RNG
/// state.
pub fn erdos_renyi<I>(names: I, p_edge: f64, rng: &mut SimRng) -> GraphResult<SocialGraph>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut b = SocialGraphBuilder::new();
    for name in names {
        b.add_vertex(name);
    }

    let n = b.vertex_count() as u32;
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen_bool(p_edge) {
                b.add_edge(VertexId(i), VertexId(j));
            }
        }
    }

    b.build()
}
