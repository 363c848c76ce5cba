//! Tiered priority-queue selection: cleanest sources always dispatch first.

use crate::error::SelectError;
use crate::metrics::OpCounter;
use crate::select::{ensure_capacity, Selection, SelectionMethod, SelectionStrategy};
use gridsel_core::{EnergySource, Megawatts, PlantId, PowerGraph};
use std::collections::BinaryHeap;

/// Dispatch ordering within one source tier: biggest plant first, plant ID
/// ascending on ties. `Ord` is explicit so the queue contract lives in one
/// place instead of an ad hoc sortable tuple.
#[derive(Debug, Clone, Copy)]
struct DispatchRank {
    power_mw: f64,
    id: PlantId,
}

impl PartialEq for DispatchRank {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for DispatchRank {}

impl PartialOrd for DispatchRank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DispatchRank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Max-heap: greater pops first. Higher power wins; on equal power
        // the lower plant ID wins, hence the reversed ID comparison.
        self.power_mw
            .total_cmp(&other.power_mw)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Partition plants into four source tiers and consume them in fixed
/// priority order Solar → Wind → Hydro → Coal, draining each tier (biggest
/// plant first) before touching the next, stopping as soon as accumulated
/// power meets demand.
///
/// Models a dispatch policy where cleaner sources always beat dirtier ones
/// regardless of relative cost. The strategy also declares a planning
/// surcharge on connection costs; the pipeline applies it to a private copy
/// of the induced subgraph before forest costing, so the shared graph is
/// never touched.
#[derive(Debug, Clone, Copy)]
pub struct PriorityTiered {
    /// Multiplicative surcharge on induced-subgraph weights at planning time.
    pub inflation: f64,
}

impl Default for PriorityTiered {
    fn default() -> Self {
        Self { inflation: 0.02 }
    }
}

impl SelectionStrategy for PriorityTiered {
    fn id(&self) -> &str {
        "tiered"
    }

    fn method(&self) -> SelectionMethod {
        SelectionMethod::Tiered
    }

    fn planning_inflation(&self) -> f64 {
        self.inflation
    }

    fn select(
        &self,
        graph: &PowerGraph,
        demand: Megawatts,
        ops: &mut OpCounter,
    ) -> Result<Selection, SelectError> {
        ensure_capacity(graph, demand)?;

        let mut tiers: [BinaryHeap<DispatchRank>; 4] = Default::default();
        for plant in graph.plants() {
            let tier = plant.source.clean_score() as usize;
            tiers[tier].push(DispatchRank {
                power_mw: plant.power_output.value(),
                id: plant.id,
            });
            ops.record(1);
        }

        let mut plants = Vec::new();
        let mut total_power = Megawatts::ZERO;
        'tiers: for source in EnergySource::ALL {
            let tier = &mut tiers[source.clean_score() as usize];
            while let Some(entry) = tier.pop() {
                plants.push(entry.id);
                total_power += Megawatts(entry.power_mw);
                ops.record(1);
                if total_power.value() >= demand.value() {
                    break 'tiers;
                }
            }
        }

        Ok(Selection {
            plants,
            total_power,
            demand,
        })
    }
}
