use rw_agent::AgentError;
use rw_core::RwError;
use rw_graph::GraphError;
use rw_intervention::InterventionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] RwError),

    #[error("simulation has not been set up")]
    NotSetup,

    #[error("simulation was already set up")]
    AlreadySetup,

    #[error("simulation already ran all {0} ticks")]
    Finished(u64),

    #[error("invariant violated: {0}")]
    Invariant(String),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Intervention(#[from] InterventionError),
}

pub type SimResult<T> = Result<T, SimError>;
