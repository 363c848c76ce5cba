//! Largest-plants-first selection.

use crate::error::SelectError;
use crate::metrics::OpCounter;
use crate::select::{ensure_capacity, Selection, SelectionMethod, SelectionStrategy};
use gridsel_core::{Megawatts, PowerGraph};

/// Sort all plants by capacity descending (plant ID ascending on ties) and
/// accept them in that order until the running total meets demand.
///
/// Greedily minimizes the number of selected plants; ignores cleanliness and
/// connection cost entirely. The stopping rule makes the result minimal by
/// construction: dropping the last-accepted plant always falls below demand.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyByPower;

impl SelectionStrategy for GreedyByPower {
    fn id(&self) -> &str {
        "greedy"
    }

    fn method(&self) -> SelectionMethod {
        SelectionMethod::GreedyPower
    }

    fn select(
        &self,
        graph: &PowerGraph,
        demand: Megawatts,
        ops: &mut OpCounter,
    ) -> Result<Selection, SelectError> {
        ensure_capacity(graph, demand)?;

        let mut ranked: Vec<_> = graph.plants().collect();
        ranked.sort_by(|a, b| {
            b.power_output
                .value()
                .total_cmp(&a.power_output.value())
                .then_with(|| a.id.cmp(&b.id))
        });
        ops.record_sort(ranked.len());

        let mut plants = Vec::new();
        let mut total_power = Megawatts::ZERO;
        for plant in ranked {
            plants.push(plant.id);
            total_power += plant.power_output;
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
