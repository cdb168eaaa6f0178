//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `RwError` as one variant
//! where configuration problems can surface through them.

use thiserror::Error;

/// The top-level error type for `rw-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum RwError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `rw-*` crates.
pub type RwResult<T> = Result<T, RwError>;
