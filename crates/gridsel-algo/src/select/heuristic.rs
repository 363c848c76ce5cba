//! Normalized multi-factor heuristic selection.

use crate::error::SelectError;
use crate::metrics::OpCounter;
use crate::select::{ensure_capacity, Selection, SelectionMethod, SelectionStrategy};
use gridsel_core::{Megawatts, PowerGraph};

/// Score every plant by `α·cleanliness + β·connectivity`, both terms
/// normalized to [0, 1] against the graph maxima, then accept plants in
/// ascending score order (cleaner and less connected first) until demand is
/// met.
///
/// A zero maximum in either term makes that term 0 for every plant; degraded
/// inputs (NaN, negative weights) cannot occur because graph validation
/// rejects them before selection runs.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicScore {
    /// Weight of the normalized clean-score term.
    pub alpha: f64,
    /// Weight of the normalized incident-edge-weight term.
    pub beta: f64,
}

impl Default for HeuristicScore {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }
}

impl SelectionStrategy for HeuristicScore {
    fn id(&self) -> &str {
        "heuristic"
    }

    fn method(&self) -> SelectionMethod {
        SelectionMethod::Heuristic
    }

    fn select(
        &self,
        graph: &PowerGraph,
        demand: Megawatts,
        ops: &mut OpCounter,
    ) -> Result<Selection, SelectError> {
        ensure_capacity(graph, demand)?;

        let max_clean = graph
            .plants()
            .map(|p| p.clean_score())
            .max()
            .unwrap_or(0) as f64;
        let max_edge_sum = graph
            .graph
            .node_indices()
            .map(|ix| graph.incident_weight(ix))
            .fold(0.0_f64, f64::max);
        ops.record(2 * graph.graph.node_count() as u64);

        let mut scored: Vec<_> = graph
            .graph
            .node_indices()
            .map(|ix| {
                let plant = &graph.graph[ix];
                let clean_term = if max_clean > 0.0 {
                    plant.clean_score() as f64 / max_clean
                } else {
                    0.0
                };
                let edge_term = if max_edge_sum > 0.0 {
                    graph.incident_weight(ix) / max_edge_sum
                } else {
                    0.0
                };
                ops.record(1 + graph.graph.edges(ix).count() as u64);
                (
                    self.alpha * clean_term + self.beta * edge_term,
                    plant.id,
                    plant.power_output,
                )
            })
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        ops.record_sort(scored.len());

        let mut plants = Vec::new();
        let mut total_power = Megawatts::ZERO;
        for (_, id, power) in scored {
            plants.push(id);
            total_power += power;
            ops.record(1);
            if total_power.value() >= demand.value() {
                break;
            }
        }

        Ok(Selection {
            plants,
            total_power,
            demand,
        })
    }
}
