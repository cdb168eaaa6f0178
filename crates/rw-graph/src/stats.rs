//! Population-level edge statistics used in diagnostic snapshots.

use crate::SocialGraph;

impl SocialGraph {
    /// Fraction of possible vertex pairs that are connected.  Zero for graphs
    /// with fewer than two vertices.
    pub fn density(&self) -> f64 {
        let max = self.max_edge_count();
        if max == 0 {
            0.0
        } else {
            self.edge_count() as f64 / max as f64
        }
    }

    /// Pearson correlation of a numeric vertex trait across edge endpoints.
    ///
    /// Each undirected edge contributes both `(x_u, x_v)` and `(x_v, x_u)`.
    /// Returns `None` when the graph has no edges or the trait has no
    /// variance among edge endpoints.
    pub fn assortativity<F>(&self, mut trait_of: F) -> Option<f64>
    where
        F: FnMut(&str) -> f64,
    {
        let edges = self.edge_positions();
        if edges.is_empty() {
            return None;
        }

        let values: Vec<f64> = self.vertex_names().map(&mut trait_of).collect();
        let m = edges.len() as f64;

        let mut sum_prod = 0.0;
        let mut sum_mean = 0.0;
        let mut sum_sq = 0.0;
        for (u, v) in edges {
            let (xu, xv) = (values[u.index()], values[v.index()]);
            sum_prod += xu * xv;
            sum_mean += 0.5 * (xu + xv);
            sum_sq += 0.5 * (xu * xu + xv * xv);
        }

        let mean = sum_mean / m;
        let var = sum_sq / m - mean * mean;
        if var.abs() < 1e-12 {
            return None;
        }
        Some((sum_prod / m - mean * mean) / var)
    }
}
