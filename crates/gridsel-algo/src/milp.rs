//! Narrow boundary to the external MILP capability.
//!
//! The exact selection strategy hands a [`SelectionMilp`] to a
//! [`MilpBackend`] and gets back a status plus, when optimal, the binary
//! assignment. The boundary is synchronous and atomic: one blocking solve
//! per call under a wall-clock budget, and an over-budget solve is reported
//! as a timeout with its result discarded. Backends must not have side
//! effects beyond tracing events.

use crate::error::SelectError;
use std::time::Duration;

/// A binary selection program: one inclusion variable per plant.
///
/// Minimize `Σ objective[i]·x[i]` subject to `Σ power[i]·x[i] ≥ demand`,
/// `x[i] ∈ {0, 1}`.
#[derive(Debug, Clone)]
pub struct SelectionMilp {
    /// Objective coefficient per variable.
    pub objective: Vec<f64>,
    /// Power contribution per variable (MW).
    pub power: Vec<f64>,
    /// Demand the selected power must meet or exceed (MW).
    pub demand: f64,
    /// Wall-clock budget for the solve.
    pub timeout: Duration,
}

/// Terminal status of one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilpStatus {
    /// Optimal assignment found.
    Optimal,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The solve did not complete within the budget.
    Timeout,
}

impl std::fmt::Display for MilpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MilpStatus::Optimal => write!(f, "optimal"),
            MilpStatus::Infeasible => write!(f, "infeasible"),
            MilpStatus::Timeout => write!(f, "timeout"),
        }
    }
}

/// Outcome of one solve.
#[derive(Debug, Clone)]
pub struct MilpOutcome {
    pub status: MilpStatus,
    /// One entry per variable, true = included. Empty unless optimal.
    pub assignment: Vec<bool>,
    /// Objective value at the returned assignment (0 unless optimal).
    pub objective_value: f64,
    pub solve_time: Duration,
}

impl MilpOutcome {
    fn terminal(status: MilpStatus, solve_time: Duration) -> Self {
        Self {
            status,
            assignment: Vec::new(),
            objective_value: 0.0,
            solve_time,
        }
    }
}

/// The external solving capability: program in, status + assignment out.
pub trait MilpBackend: Send + Sync {
    /// Unique identifier (e.g. "highs").
    fn id(&self) -> &str;

    /// Run one atomic blocking solve. `Err` is reserved for process-level
    /// backend failures; infeasibility and timeouts are statuses.
    fn solve(&self, problem: &SelectionMilp) -> Result<MilpOutcome, SelectError>;
}

#[cfg(feature = "solver-highs")]
pub use self::highs_backend::GoodLpBackend;

#[cfg(feature = "solver-highs")]
mod highs_backend {
    use super::*;
    use good_lp::solvers::highs::highs;
    use good_lp::{constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel};
    use std::time::Instant;
    use tracing::debug;

    /// MILP solving via good_lp with the HiGHS backend.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct GoodLpBackend;

    impl MilpBackend for GoodLpBackend {
        fn id(&self) -> &str {
            "highs"
        }

        fn solve(&self, problem: &SelectionMilp) -> Result<MilpOutcome, SelectError> {
            let start = Instant::now();
            let mut vars = variables!();
            let xs: Vec<_> = problem
                .objective
                .iter()
                .map(|_| vars.add(variable().binary()))
                .collect();

            let mut objective = Expression::from(0.0);
            for (x, c) in xs.iter().zip(&problem.objective) {
                objective += *c * *x;
            }
            let mut power = Expression::from(0.0);
            for (x, p) in xs.iter().zip(&problem.power) {
                power += *p * *x;
            }

            debug!(
                variables = xs.len(),
                demand = problem.demand,
                "submitting selection MILP"
            );
            let model = vars
                .minimise(objective.clone())
                .using(highs)
                .with(constraint!(power >= problem.demand));

            let solved = model.solve();
            let elapsed = start.elapsed();
            if elapsed > problem.timeout {
                debug!(?elapsed, "solve exceeded budget, discarding result");
                return Ok(MilpOutcome::terminal(MilpStatus::Timeout, elapsed));
            }
            match solved {
                Ok(solution) => {
                    let assignment: Vec<bool> =
                        xs.iter().map(|x| solution.value(*x) > 0.5).collect();
                    let objective_value = solution.eval(&objective);
                    debug!(?elapsed, objective_value, "solve optimal");
                    Ok(MilpOutcome {
                        status: MilpStatus::Optimal,
                        assignment,
                        objective_value,
                        solve_time: elapsed,
                    })
                }
                Err(ResolutionError::Infeasible) => {
                    debug!(?elapsed, "solve infeasible");
                    Ok(MilpOutcome::terminal(MilpStatus::Infeasible, elapsed))
                }
                Err(other) => Err(SelectError::Solver(format!("{other:?}"))),
            }
        }
    }
}
