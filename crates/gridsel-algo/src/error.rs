//! Error taxonomy for selection runs.
//!
//! Every variant is terminal for the current invocation: the caller gets the
//! failure kind plus the totals needed to diagnose it, and nothing is
//! retried or silently substituted.

use gridsel_core::Megawatts;
use std::time::Duration;
use thiserror::Error;

/// Selection pipeline errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectError {
    /// Total capacity in the graph cannot meet demand; no subset can help.
    #[error("demand {demand} exceeds available capacity {available}")]
    InsufficientCapacity {
        demand: Megawatts,
        available: Megawatts,
    },

    /// The exact optimizer proved that no feasible assignment exists.
    /// Distinct from [`SelectError::InsufficientCapacity`]: this outcome is
    /// certified by the solver rather than by a capacity pre-check.
    #[error("no feasible selection exists for demand {demand}")]
    Infeasible { demand: Megawatts },

    /// The external solver exceeded its time budget. No partial result is
    /// kept; the caller decides whether to retry with relaxed parameters.
    #[error("solver exceeded time budget of {budget:?}")]
    SolverTimeout { budget: Duration },

    /// Structural problem detected before any selection logic ran.
    #[error("malformed graph: {0}")]
    MalformedGraph(String),

    /// The demand target itself is unusable (non-positive or non-finite).
    #[error("demand target must be positive, got {0}")]
    InvalidDemand(Megawatts),

    /// Backend failure other than infeasibility or timeout.
    #[error("solver failure: {0}")]
    Solver(String),
}
