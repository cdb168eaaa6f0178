use rw_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("behavior length {got} does not match expected length {expected}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("no agent named {0:?}")]
    UnknownAgent(String),

    #[error("agent name {0:?} used twice")]
    DuplicateAgent(String),

    #[error("risk model domain error: {0}")]
    Domain(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type AgentResult<T> = Result<T, AgentError>;
