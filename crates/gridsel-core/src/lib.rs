//! # gridsel-core: Generation Network Modeling Core
//!
//! Fundamental data structures for clean-generation selection studies.
//!
//! ## Design Philosophy
//!
//! A study network is an **undirected simple graph** where:
//! - **Nodes**: generation plants with an energy source and a capacity
//! - **Edges**: transmission corridors with a connection cost weight
//!
//! The graph-based representation enables:
//! - Fast topological queries (connectivity, island detection)
//! - Induced-subgraph extraction for evaluating a selected fleet
//! - Type-safe plant access with newtype IDs
//!
//! ## Quick Start
//!
//! ```rust
//! use gridsel_core::*;
//!
//! let mut graph = PowerGraph::new();
//!
//! graph.add_plant(Plant::new(PlantId::new(0), "AAA", EnergySource::Solar, 100.0));
//! graph.add_plant(Plant::new(PlantId::new(1), "BBB", EnergySource::Coal, 150.0));
//! graph.connect(PlantId::new(0), PlantId::new(1), 10.0).unwrap();
//!
//! assert_eq!(graph.stats().num_plants, 2);
//! ```
//!
//! ## Core Data Structures
//!
//! - [`PowerGraph`] - the network container (petgraph `Graph<Plant, Line, Undirected>`)
//! - [`Plant`] - a generation node with [`EnergySource`] and capacity
//! - [`Line`] - a transmission corridor with a cost weight
//! - [`PlantId`] - stable plant identifier, independent of petgraph indices
//!
//! ## Modules
//!
//! - [`graph_utils`] - topological analysis (stats, islands, DOT export)
//! - [`units`] - unit newtypes ([`Megawatts`])
//! - [`error`] - unified error type for io/validation boundaries

use petgraph::prelude::*;
use petgraph::visit::EdgeRef;
use petgraph::Undirected;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod graph_utils;
pub mod units;

pub use error::{GridError, GridResult};
pub use graph_utils::*;
pub use petgraph::graph::NodeIndex;
pub use units::Megawatts;

/// Stable plant identifier, unique within a graph.
///
/// Distinct from `petgraph::NodeIndex`: plant IDs survive subgraph
/// extraction, while node indices are local to one graph instance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlantId(usize);

impl PlantId {
    #[inline]
    pub fn new(value: usize) -> Self {
        PlantId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for PlantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Energy source of a generation plant.
///
/// The variant order is the dispatch priority order, cleanest first. The
/// clean score is a fixed integer proxy for environmental impact: lower is
/// cleaner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum EnergySource {
    Solar,
    Wind,
    Hydro,
    Coal,
}

impl EnergySource {
    /// All sources in dispatch priority order (cleanest to dirtiest).
    pub const ALL: [EnergySource; 4] = [
        EnergySource::Solar,
        EnergySource::Wind,
        EnergySource::Hydro,
        EnergySource::Coal,
    ];

    /// Fixed environmental-impact score: Solar=0, Wind=1, Hydro=2, Coal=3.
    #[inline]
    pub fn clean_score(&self) -> u32 {
        match self {
            EnergySource::Solar => 0,
            EnergySource::Wind => 1,
            EnergySource::Hydro => 2,
            EnergySource::Coal => 3,
        }
    }
}

impl std::fmt::Display for EnergySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnergySource::Solar => write!(f, "Solar"),
            EnergySource::Wind => write!(f, "Wind"),
            EnergySource::Hydro => write!(f, "Hydro"),
            EnergySource::Coal => write!(f, "Coal"),
        }
    }
}

impl std::str::FromStr for EnergySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solar" => Ok(EnergySource::Solar),
            "wind" => Ok(EnergySource::Wind),
            "hydro" => Ok(EnergySource::Hydro),
            "coal" => Ok(EnergySource::Coal),
            _ => Err(format!("Unknown energy source: {}", s)),
        }
    }
}

/// A generation plant node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub id: PlantId,
    /// Display label
    pub name: String,
    pub source: EnergySource,
    /// Generation capacity; must be positive and finite
    pub power_output: Megawatts,
}

impl Plant {
    pub fn new(id: PlantId, name: impl Into<String>, source: EnergySource, power_mw: f64) -> Self {
        Self {
            id,
            name: name.into(),
            source,
            power_output: Megawatts(power_mw),
        }
    }

    /// Environmental-impact score of this plant's source.
    #[inline]
    pub fn clean_score(&self) -> u32 {
        self.source.clean_score()
    }
}

/// A transmission corridor edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    /// Connection cost; must be non-negative and finite
    pub weight: f64,
}

impl Line {
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

/// The core study network graph.
///
/// Simple and undirected: no self-loops, at most one line per plant pair.
/// [`PowerGraph::validate`] enforces these invariants fail-fast.
#[derive(Debug, Clone, Default)]
pub struct PowerGraph {
    pub graph: Graph<Plant, Line, Undirected>,
}

impl PowerGraph {
    pub fn new() -> Self {
        Self {
            graph: Graph::new_undirected(),
        }
    }

    /// Add a plant node. The caller is responsible for ID uniqueness;
    /// [`PowerGraph::validate`] reports duplicates.
    pub fn add_plant(&mut self, plant: Plant) -> NodeIndex {
        self.graph.add_node(plant)
    }

    /// Connect two plants with a line. Fails if either plant is missing or
    /// the endpoints coincide.
    pub fn connect(&mut self, a: PlantId, b: PlantId, weight: f64) -> GridResult<EdgeIndex> {
        if a == b {
            return Err(GridError::Malformed(format!(
                "self-loop on plant {} is not allowed",
                a
            )));
        }
        let ia = self
            .node_of(a)
            .ok_or_else(|| GridError::Malformed(format!("line references missing plant {}", a)))?;
        let ib = self
            .node_of(b)
            .ok_or_else(|| GridError::Malformed(format!("line references missing plant {}", b)))?;
        Ok(self.graph.add_edge(ia, ib, Line::new(weight)))
    }

    /// Look up the node index holding a plant ID (linear scan).
    pub fn node_of(&self, id: PlantId) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .find(|&ix| self.graph[ix].id == id)
    }

    /// Look up a plant by ID.
    pub fn plant(&self, id: PlantId) -> Option<&Plant> {
        self.node_of(id).map(|ix| &self.graph[ix])
    }

    /// All plants, in node-insertion order.
    pub fn plants(&self) -> impl Iterator<Item = &Plant> {
        self.graph.node_weights()
    }

    /// All lines as (endpoint IDs, weight) triples, in edge-insertion order.
    pub fn lines(&self) -> impl Iterator<Item = (PlantId, PlantId, f64)> + '_ {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].id,
                self.graph[e.target()].id,
                e.weight().weight,
            )
        })
    }

    /// Total generation capacity over all plants.
    pub fn total_capacity(&self) -> Megawatts {
        self.plants().map(|p| p.power_output).sum()
    }

    /// Sum of incident line weights for a plant (its connectivity burden).
    pub fn incident_weight(&self, ix: NodeIndex) -> f64 {
        self.graph.edges(ix).map(|e| e.weight().weight).sum()
    }

    /// Build the subgraph induced by a plant-ID set: the named plants plus
    /// every line whose both endpoints are in the set. Plant IDs are
    /// preserved; petgraph node indices are not.
    pub fn induced_subgraph(&self, ids: &[PlantId]) -> PowerGraph {
        let keep: std::collections::HashSet<PlantId> = ids.iter().copied().collect();
        let mut sub = PowerGraph::new();
        let mut index_map = std::collections::HashMap::new();
        for ix in self.graph.node_indices() {
            let plant = &self.graph[ix];
            if keep.contains(&plant.id) {
                let new_ix = sub.graph.add_node(plant.clone());
                index_map.insert(ix, new_ix);
            }
        }
        for edge in self.graph.edge_references() {
            if let (Some(&a), Some(&b)) = (
                index_map.get(&edge.source()),
                index_map.get(&edge.target()),
            ) {
                sub.graph.add_edge(a, b, edge.weight().clone());
            }
        }
        sub
    }

    /// Compute basic statistics about the network.
    pub fn stats(&self) -> PowerGraphStats {
        let mut stats = PowerGraphStats {
            num_lines: self.graph.edge_count(),
            ..Default::default()
        };
        for plant in self.plants() {
            stats.num_plants += 1;
            stats.total_capacity_mw += plant.power_output.value();
            match plant.source {
                EnergySource::Solar => stats.num_solar += 1,
                EnergySource::Wind => stats.num_wind += 1,
                EnergySource::Hydro => stats.num_hydro += 1,
                EnergySource::Coal => stats.num_coal += 1,
            }
        }
        stats
    }

    /// Validate structural invariants, failing fast on the first problem:
    /// duplicate plant IDs, non-positive or non-finite capacity, negative or
    /// non-finite line weights, self-loops, parallel lines.
    pub fn validate(&self) -> GridResult<()> {
        let mut seen = std::collections::HashSet::new();
        for plant in self.plants() {
            if !seen.insert(plant.id) {
                return Err(GridError::Malformed(format!(
                    "duplicate plant id {}",
                    plant.id
                )));
            }
            let mw = plant.power_output.value();
            if !mw.is_finite() || mw <= 0.0 {
                return Err(GridError::Malformed(format!(
                    "plant {} ({}) has invalid capacity {} MW",
                    plant.id, plant.name, mw
                )));
            }
        }
        let mut seen_pairs = std::collections::HashSet::new();
        for edge in self.graph.edge_references() {
            let (u, v) = (edge.source(), edge.target());
            if u == v {
                return Err(GridError::Malformed(format!(
                    "self-loop on plant {}",
                    self.graph[u].id
                )));
            }
            let w = edge.weight().weight;
            if !w.is_finite() || w < 0.0 {
                return Err(GridError::Malformed(format!(
                    "line {}-{} has invalid weight {}",
                    self.graph[u].id, self.graph[v].id, w
                )));
            }
            let pair = if self.graph[u].id <= self.graph[v].id {
                (self.graph[u].id, self.graph[v].id)
            } else {
                (self.graph[v].id, self.graph[u].id)
            };
            if !seen_pairs.insert(pair) {
                return Err(GridError::Malformed(format!(
                    "parallel lines between plants {} and {}",
                    pair.0, pair.1
                )));
            }
        }
        Ok(())
    }
}

/// Statistics about a network's size and capacity.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PowerGraphStats {
    pub num_plants: usize,
    pub num_lines: usize,
    pub total_capacity_mw: f64,
    pub num_solar: usize,
    pub num_wind: usize,
    pub num_hydro: usize,
    pub num_coal: usize,
}

impl std::fmt::Display for PowerGraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} plants ({:.0} MW), {} lines; {} solar / {} wind / {} hydro / {} coal",
            self.num_plants,
            self.total_capacity_mw,
            self.num_lines,
            self.num_solar,
            self.num_wind,
            self.num_hydro,
            self.num_coal
        )
    }
}
