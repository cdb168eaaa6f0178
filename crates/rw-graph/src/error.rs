//! Graph-subsystem error type.

use thiserror::Error;

/// Errors produced by `rw-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("vertex {0:?} not found in graph")]
    UnknownVertex(String),

    #[error("vertex {0:?} added twice")]
    DuplicateVertex(String),

    #[error("self-loop on vertex {0:?} rejected")]
    SelfLoop(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
