use rw_agent::AgentError;
use rw_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterventionError {
    #[error("{0} intervention has not been set up")]
    NotSetup(String),

    #[error("{0} intervention was already set up")]
    AlreadySetup(String),

    #[error("odds-ratio count {got} does not match behavior length {expected}")]
    OddsRatioMismatch { expected: usize, got: usize },

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type InterventionResult<T> = Result<T, InterventionError>;
