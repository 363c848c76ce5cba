//! Result aggregation and the operation-count proxy.
//!
//! The proxy is a synthetic scalar for comparing algorithmic effort across
//! strategies on the same input. It is deterministic and grows with input
//! size; it is not a performance measurement. Accumulation happens in an
//! explicit [`OpCounter`] value threaded through each call, never in
//! process-wide state.

use crate::mst::SpanningForest;
use crate::select::{Selection, SelectionMethod};
use gridsel_core::{EnergySource, Megawatts, PowerGraph};
use serde::Serialize;

/// Deterministic operation accumulator for one pipeline invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OpCounter {
    count: u64,
}

impl OpCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a number of unit operations (nodes touched, edges examined).
    #[inline]
    pub fn record(&mut self, units: u64) {
        self.count += units;
    }

    /// Record a comparison sort over `n` items, estimated as
    /// `n * bit_length(n)`.
    pub fn record_sort(&mut self, n: usize) {
        let bits = (usize::BITS - n.leading_zeros()) as u64;
        self.count += n as u64 * bits;
    }

    pub fn total(&self) -> u64 {
        self.count
    }
}

/// Count of selected plants per energy source. All four sources are always
/// present, defaulting to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnergyBreakdown {
    pub solar: usize,
    pub wind: usize,
    pub hydro: usize,
    pub coal: usize,
}

impl EnergyBreakdown {
    pub fn add(&mut self, source: EnergySource) {
        match source {
            EnergySource::Solar => self.solar += 1,
            EnergySource::Wind => self.wind += 1,
            EnergySource::Hydro => self.hydro += 1,
            EnergySource::Coal => self.coal += 1,
        }
    }

    pub fn count(&self, source: EnergySource) -> usize {
        match source {
            EnergySource::Solar => self.solar,
            EnergySource::Wind => self.wind,
            EnergySource::Hydro => self.hydro,
            EnergySource::Coal => self.coal,
        }
    }

    /// Total selected plants; always equals the selection length.
    pub fn total(&self) -> usize {
        self.solar + self.wind + self.hydro + self.coal
    }
}

impl std::fmt::Display for EnergyBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Solar: {}, Wind: {}, Hydro: {}, Coal: {}",
            self.solar, self.wind, self.hydro, self.coal
        )
    }
}

/// One structured result per strategy invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMetrics {
    pub method: SelectionMethod,
    pub selection: Selection,
    pub forest: SpanningForest,
    pub breakdown: EnergyBreakdown,
    /// Final operation-count proxy for the whole invocation.
    pub op_count: u64,
}

/// Derive final metrics from a selection and its spanning forest.
///
/// The realized power is recomputed from the final selection against the
/// graph rather than trusted from the strategy's running total, keeping this
/// step strategy-agnostic. Aggregation is idempotent: the same inputs yield
/// the same [`RunMetrics`].
pub fn aggregate(
    method: SelectionMethod,
    graph: &PowerGraph,
    selection: &Selection,
    forest: &SpanningForest,
    mut ops: OpCounter,
) -> RunMetrics {
    let mut breakdown = EnergyBreakdown::default();
    let mut realized = Megawatts::ZERO;
    for id in &selection.plants {
        if let Some(plant) = graph.plant(*id) {
            realized += plant.power_output;
            breakdown.add(plant.source);
        }
        ops.record(1);
    }
    RunMetrics {
        method,
        selection: Selection {
            plants: selection.plants.clone(),
            total_power: realized,
            demand: selection.demand,
        },
        forest: forest.clone(),
        breakdown,
        op_count: ops.total(),
    }
}
