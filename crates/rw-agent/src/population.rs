//! `Population` — the closed set of agents in one run.
//!
//! Agents are stored by `AgentId` (their index) and never reordered; the
//! per-tick processing order is a separate shuffled `Vec<AgentId>` owned by
//! the orchestrator.  A name index mirrors the graph's, so a neighbor name
//! returned by the graph resolves to an agent in O(1).

use rustc_hash::FxHashMap;

use rw_core::{AgentId, SimRng};

use crate::{Agent, AgentError, AgentResult};

pub struct Population {
    agents:  Vec<Agent>,
    by_name: FxHashMap<String, AgentId>,
}

impl Population {
    /// `count` agents named `id_0 .. id_{count-1}`, behaviors drawn from
    /// `baserates`.
    pub fn sample(count: usize, baserates: &[f64], rng: &mut SimRng) -> Self {
        let agents: Vec<Agent> = (0..count as u32)
            .map(|i| Agent::sample(AgentId(i), baserates, rng))
            .collect();
        let by_name = agents.iter().map(|a| (a.name.clone(), a.id)).collect();
        Self { agents, by_name }
    }

    /// Wrap pre-built agents.  `agents[i].id` is reassigned to `AgentId(i)`;
    /// names must be unique.
    pub fn from_agents(mut agents: Vec<Agent>) -> AgentResult<Self> {
        let mut by_name = FxHashMap::with_capacity_and_hasher(agents.len(), Default::default());
        for (i, agent) in agents.iter_mut().enumerate() {
            agent.id = AgentId(i as u32);
            if by_name.insert(agent.name.clone(), agent.id).is_some() {
                return Err(AgentError::DuplicateAgent(agent.name.clone()));
            }
        }
        Ok(Self { agents, by_name })
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// All ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.agents.len() as u32).map(AgentId)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.agents.iter().map(|a| a.name.as_str())
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> &mut Agent {
        &mut self.agents[id.index()]
    }

    pub fn id_of(&self, name: &str) -> AgentResult<AgentId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| AgentError::UnknownAgent(name.to_owned()))
    }

    pub fn by_name(&self, name: &str) -> Option<&Agent> {
        self.by_name.get(name).map(|&id| &self.agents[id.index()])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> + '_ {
        self.agents.iter_mut()
    }

    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }
}
