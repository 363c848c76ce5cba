//! Interchangeable node-selection strategies.
//!
//! Each strategy consumes a read-only [`PowerGraph`] and a demand target and
//! produces an ordered plant subset whose realized power meets or exceeds
//! the demand, or a terminal [`SelectError`]. Strategies never mutate the
//! shared graph, so independent invocations may run concurrently against the
//! same input.

pub mod exact;
pub mod greedy;
pub mod heuristic;
pub mod tiered;

pub use exact::ExactOptimization;
pub use greedy::GreedyByPower;
pub use heuristic::HeuristicScore;
pub use tiered::PriorityTiered;

use crate::error::SelectError;
use crate::metrics::OpCounter;
use gridsel_core::{Megawatts, PlantId, PowerGraph};
use serde::Serialize;

/// Strategy identifier for reporting and CLI dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionMethod {
    /// Largest plants first, ignoring cleanliness and cost
    GreedyPower,
    /// Normalized cleanliness + connectivity score, ascending
    Heuristic,
    /// Source tiers in fixed priority order, cleanest first
    Tiered,
    /// Exact MILP over binary inclusion variables
    Exact,
}

impl SelectionMethod {
    pub const ALL: [SelectionMethod; 4] = [
        SelectionMethod::GreedyPower,
        SelectionMethod::Heuristic,
        SelectionMethod::Tiered,
        SelectionMethod::Exact,
    ];
}

impl std::fmt::Display for SelectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionMethod::GreedyPower => write!(f, "greedy"),
            SelectionMethod::Heuristic => write!(f, "heuristic"),
            SelectionMethod::Tiered => write!(f, "tiered"),
            SelectionMethod::Exact => write!(f, "exact"),
        }
    }
}

impl std::str::FromStr for SelectionMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "greedy" | "greedy-power" => Ok(SelectionMethod::GreedyPower),
            "heuristic" | "score" => Ok(SelectionMethod::Heuristic),
            "tiered" | "priority" => Ok(SelectionMethod::Tiered),
            "exact" | "milp" => Ok(SelectionMethod::Exact),
            _ => Err(format!("Unknown selection method: {}", s)),
        }
    }
}

/// An ordered plant subset meeting a demand target.
///
/// Insertion order is the selection order; semantically this is a set and
/// contains no duplicates. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub plants: Vec<PlantId>,
    /// Sum of `power_output` over the chosen plants.
    pub total_power: Megawatts,
    /// The demand this selection was computed against.
    pub demand: Megawatts,
}

/// A node-selection algorithm.
///
/// Implementations are `Send + Sync` so independent runs can share one
/// read-only graph across threads.
pub trait SelectionStrategy: Send + Sync {
    /// Unique identifier (e.g. "greedy", "exact").
    fn id(&self) -> &str;

    /// Method tag for result records.
    fn method(&self) -> SelectionMethod;

    /// Multiplicative surcharge this strategy wants applied to a private
    /// copy of the induced subgraph before forest costing. Zero for most
    /// strategies.
    fn planning_inflation(&self) -> f64 {
        0.0
    }

    /// Choose plants until accumulated power meets `demand`.
    fn select(
        &self,
        graph: &PowerGraph,
        demand: Megawatts,
        ops: &mut OpCounter,
    ) -> Result<Selection, SelectError>;
}

/// Shared pre-check: demand must be coverable by the whole graph at all.
/// Returns the total available capacity for error reporting.
pub(crate) fn ensure_capacity(
    graph: &PowerGraph,
    demand: Megawatts,
) -> Result<Megawatts, SelectError> {
    let available = graph.total_capacity();
    if available.value() < demand.value() {
        return Err(SelectError::InsufficientCapacity { demand, available });
    }
    Ok(available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsel_core::{EnergySource, Plant, PlantId};

    #[test]
    fn test_method_round_trip() {
        for method in SelectionMethod::ALL {
            let parsed: SelectionMethod = method.to_string().parse().unwrap();
            assert_eq!(parsed, method);
        }
        assert!("simulated-annealing".parse::<SelectionMethod>().is_err());
    }

    #[test]
    fn test_ensure_capacity() {
        let mut g = PowerGraph::new();
        g.add_plant(Plant::new(PlantId::new(0), "AAA", EnergySource::Wind, 100.0));
        assert!(ensure_capacity(&g, Megawatts(50.0)).is_ok());
        let err = ensure_capacity(&g, Megawatts(500.0)).unwrap_err();
        assert!(matches!(err, SelectError::InsufficientCapacity { .. }));
    }

    /// The strategy trait must stay object-safe: the pipeline holds
    /// strategies as `&dyn SelectionStrategy`.
    #[test]
    fn test_trait_object_safe() {
        fn _accepts(_s: &dyn SelectionStrategy) {}
        fn _assert_send_sync<T: Send + Sync>() {}
        _assert_send_sync::<Box<dyn SelectionStrategy>>();
    }
}
