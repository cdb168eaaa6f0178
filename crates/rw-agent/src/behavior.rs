//! Rules that read the graph or other agents.
//!
//! Each takes the acting agent's id plus the graph and mutates in place.
//! Callers run them one agent at a time, so every call observes the effects
//! of all earlier calls in the same tick.

use rw_core::{AgentId, SimRng};
use rw_graph::SocialGraph;

use crate::{AgentError, AgentResult, Population};

impl Population {
    /// Ids of `who`'s current neighbors, in graph order.
    pub fn alters(&self, who: AgentId, graph: &SocialGraph) -> AgentResult<Vec<AgentId>> {
        graph
            .neighbors(&self.get(who).name)?
            .into_iter()
            .map(|name| self.id_of(name))
            .collect()
    }

    /// Similarity between two members.
    pub fn similarity(&self, a: AgentId, b: AgentId) -> AgentResult<f64> {
        self.get(a).similarity(self.get(b))
    }

    /// For each behavior index independently, with probability `p`, copy the
    /// value from a neighbor drawn uniformly at random for that index.
    ///
    /// An agent without neighbors is left unchanged.
    pub fn emulate_from_neighborhood(
        &mut self,
        who:   AgentId,
        graph: &SocialGraph,
        p:     f64,
        rng:   &mut SimRng,
    ) -> AgentResult<()> {
        let alters = self.alters(who, graph)?;
        let n_beh = self.get(who).behavior.len();

        let diag = &mut self.get_mut(who).diagnostics;
        diag.emulations = 0;
        diag.emulated_risk_factors = 0;
        diag.emulatable_alters = alters.len();

        if alters.is_empty() {
            return Ok(());
        }

        for i in 0..n_beh {
            if !rng.gen_bool(p) {
                continue;
            }
            let Some(&alter) = rng.choose(&alters) else {
                continue;
            };
            let source = &self.get(alter).behavior;
            let value = *source.get(i).ok_or(AgentError::LengthMismatch {
                expected: n_beh,
                got:      source.len(),
            })?;

            let me = self.get_mut(who);
            me.behavior[i] = value;
            me.diagnostics.emulations += 1;
            me.diagnostics.emulated_risk_factors += value as usize;
        }
        Ok(())
    }

    /// Drop every edge from `who` to a neighbor with similarity below
    /// `sim_thresh`.  Returns the number of edges removed.
    pub fn prune_alters(
        &mut self,
        who:        AgentId,
        graph:      &mut SocialGraph,
        sim_thresh: f64,
    ) -> AgentResult<usize> {
        let mut pruned = 0;
        for alter in self.alters(who, graph)? {
            if self.similarity(who, alter)? < sim_thresh
                && graph.remove_edge(&self.get(who).name, &self.get(alter).name)?
            {
                pruned += 1;
            }
        }
        self.get_mut(who).diagnostics.pruned_alters = pruned;
        Ok(pruned)
    }

    /// Connect `who` to every non-neighbor (other than itself) with
    /// similarity at least `sim_thresh`, visiting candidates in id order and
    /// stopping once `max_alters` is reached.  Returns the number of edges
    /// added.
    pub fn recruit_alters(
        &mut self,
        who:        AgentId,
        graph:      &mut SocialGraph,
        sim_thresh: f64,
    ) -> AgentResult<usize> {
        let name = self.get(who).name.clone();
        let capacity = self.get(who).max_alters;
        let mut degree = graph.degree(&name)?;
        let mut recruited = 0;

        for candidate in self.ids() {
            if capacity.is_some_and(|cap| degree >= cap) {
                break;
            }
            if candidate == who {
                continue;
            }
            let other = &self.get(candidate).name;
            if graph.has_edge(&name, other)? {
                continue;
            }
            if self.similarity(who, candidate)? >= sim_thresh && graph.add_edge(&name, other)? {
                recruited += 1;
                degree += 1;
            }
        }

        self.get_mut(who).diagnostics.recruited_alters = recruited;
        Ok(recruited)
    }
}
