//! # gridsel-algo: Selection Strategies and Network Costing
//!
//! The selection-and-evaluation pipeline for clean-generation studies:
//! interchangeable strategies pick a fleet of plants meeting a demand
//! target, a spanning-forest evaluator costs the network needed to connect
//! the fleet, and a metrics aggregator turns each run into one structured
//! comparison record.
//!
//! ## Selection strategies
//!
//! | Strategy | Description | Guarantee |
//! |----------|-------------|-----------|
//! | [`GreedyByPower`] | Largest plants first | Minimal-by-construction stop |
//! | [`HeuristicScore`] | Normalized cleanliness + connectivity score | None (polynomial heuristic) |
//! | [`PriorityTiered`] | Source tiers, cleanest first | None (polynomial heuristic) |
//! | [`ExactOptimization`] | Binary MILP over inclusion variables | Certified optimum of the weighted objective |
//!
//! All strategies share the [`SelectionStrategy`] seam and the same failure
//! contract: a demand no subset can cover is a terminal error, never a
//! silent partial result.
//!
//! ## Pipeline
//!
//! [`pipeline::run`] wires one strategy invocation end to end:
//! validate → select → induce subgraph → (optional private-copy surcharge) →
//! minimum spanning forest → [`RunMetrics`]. [`PlanRunner`] runs a roster of
//! strategies against the same graph for side-by-side comparison.
//!
//! ## Example
//!
//! ```no_run
//! use gridsel_algo::{pipeline, GreedyByPower};
//! use gridsel_core::{Megawatts, PowerGraph};
//!
//! let graph = PowerGraph::new(); // load or generate
//! let metrics = pipeline::run(&graph, &GreedyByPower, Megawatts(5000.0))?;
//! println!(
//!     "{} plants, {:.2} connection cost",
//!     metrics.selection.plants.len(),
//!     metrics.forest.total_cost
//! );
//! # Ok::<(), gridsel_algo::SelectError>(())
//! ```

pub mod error;
pub mod metrics;
pub mod milp;
pub mod mst;
pub mod pipeline;
pub mod select;

pub use error::SelectError;
pub use metrics::{aggregate, EnergyBreakdown, OpCounter, RunMetrics};
pub use milp::{MilpBackend, MilpOutcome, MilpStatus, SelectionMilp};
pub use mst::{minimum_spanning_forest, ForestEdge, SpanningForest};
pub use pipeline::PlanRunner;
pub use select::{
    ExactOptimization, GreedyByPower, HeuristicScore, PriorityTiered, Selection, SelectionMethod,
    SelectionStrategy,
};

#[cfg(feature = "solver-highs")]
pub use milp::GoodLpBackend;
