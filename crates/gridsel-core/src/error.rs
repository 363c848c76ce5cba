//! Unified error types for the GridSel ecosystem.
//!
//! [`GridError`] gives the io and CLI layers a single error representation.
//! Algorithm-level failures (insufficient capacity, infeasibility, solver
//! timeouts) carry more structure and live in `gridsel-algo`.

use thiserror::Error;

/// Unified error type for graph loading, validation, and export.
#[derive(Error, Debug)]
pub enum GridError {
    /// I/O errors (file access, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Structural problems in a power graph: a line referencing a missing
    /// plant, a non-positive capacity, a bad edge weight
    #[error("Malformed graph: {0}")]
    Malformed(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using GridError.
pub type GridResult<T> = Result<T, GridError>;

impl From<anyhow::Error> for GridError {
    fn from(err: anyhow::Error) -> Self {
        GridError::Other(err.to_string())
    }
}

impl From<String> for GridError {
    fn from(s: String) -> Self {
        GridError::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        GridError::Other(s.to_string())
    }
}
