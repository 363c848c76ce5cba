//! Pipeline orchestration: strategy → induced subgraph → spanning forest →
//! metrics, producing one structured result per strategy invocation.

use crate::error::SelectError;
use crate::metrics::{aggregate, OpCounter, RunMetrics};
use crate::mst::minimum_spanning_forest;
use crate::select::SelectionStrategy;
use gridsel_core::{Megawatts, PowerGraph};
use tracing::{debug, info};

/// Run one strategy end to end against a read-only graph.
///
/// Validates the graph fail-fast, selects a fleet, extracts the induced
/// subgraph, applies the strategy's planning surcharge to that private copy
/// when one is declared, costs the minimum spanning forest, and aggregates
/// the final metrics. The shared graph is never mutated.
pub fn run(
    graph: &PowerGraph,
    strategy: &dyn SelectionStrategy,
    demand: Megawatts,
) -> Result<RunMetrics, SelectError> {
    if !demand.value().is_finite() || demand.value() <= 0.0 {
        return Err(SelectError::InvalidDemand(demand));
    }
    graph
        .validate()
        .map_err(|e| SelectError::MalformedGraph(e.to_string()))?;

    let mut ops = OpCounter::new();
    let selection = strategy.select(graph, demand, &mut ops)?;
    debug!(
        strategy = strategy.id(),
        selected = selection.plants.len(),
        power = selection.total_power.value(),
        "selection complete"
    );

    let mut induced = graph.induced_subgraph(&selection.plants);
    ops.record((induced.graph.node_count() + induced.graph.edge_count()) as u64);

    let inflation = strategy.planning_inflation();
    if inflation > 0.0 {
        for line in induced.graph.edge_weights_mut() {
            line.weight += line.weight * inflation;
            ops.record(1);
        }
    }

    let forest = minimum_spanning_forest(&induced, &mut ops);
    let metrics = aggregate(strategy.method(), graph, &selection, &forest, ops);
    info!(
        strategy = strategy.id(),
        plants = metrics.selection.plants.len(),
        power = metrics.selection.total_power.value(),
        cost = metrics.forest.total_cost,
        components = metrics.forest.components,
        ops = metrics.op_count,
        "run complete"
    );
    Ok(metrics)
}

/// Runs a fixed strategy roster against one graph for side-by-side
/// comparison. Strategies never interact; each failure is per-strategy.
#[derive(Default)]
pub struct PlanRunner {
    strategies: Vec<Box<dyn SelectionStrategy>>,
}

impl PlanRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: Box<dyn SelectionStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// The standard comparison roster: all heuristics with their default
    /// parameters, plus exact optimization when a solver backend is built
    /// in.
    pub fn standard() -> Self {
        let runner = Self::new()
            .with_strategy(Box::new(crate::select::GreedyByPower))
            .with_strategy(Box::new(crate::select::HeuristicScore::default()))
            .with_strategy(Box::new(crate::select::PriorityTiered::default()));
        #[cfg(feature = "solver-highs")]
        let runner = runner.with_strategy(Box::new(crate::select::ExactOptimization::default()));
        runner
    }

    pub fn strategies(&self) -> impl Iterator<Item = &dyn SelectionStrategy> {
        self.strategies.iter().map(|s| s.as_ref())
    }

    /// Run every registered strategy, returning each outcome alongside the
    /// strategy id.
    pub fn run_all(
        &self,
        graph: &PowerGraph,
        demand: Megawatts,
    ) -> Vec<(String, Result<RunMetrics, SelectError>)> {
        self.strategies
            .iter()
            .map(|s| (s.id().to_string(), run(graph, s.as_ref(), demand)))
            .collect()
    }
}
