//! JSON wire format for study networks.

use gridsel_core::{EnergySource, GridError, GridResult, Plant, PlantId, PowerGraph};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One plant row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantRecord {
    pub id: usize,
    pub name: String,
    pub source: EnergySource,
    pub power_mw: f64,
}

/// One line row, endpoints by plant ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRecord {
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

/// Top-level file schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphFile {
    pub plants: Vec<PlantRecord>,
    pub lines: Vec<LineRecord>,
}

impl GraphFile {
    /// Materialize the records into a graph. Line endpoints are resolved
    /// against the plant rows, so dangling references fail here.
    pub fn to_graph(&self) -> GridResult<PowerGraph> {
        let mut graph = PowerGraph::new();
        for plant in &self.plants {
            graph.add_plant(Plant::new(
                PlantId::new(plant.id),
                plant.name.clone(),
                plant.source,
                plant.power_mw,
            ));
        }
        for line in &self.lines {
            graph.connect(PlantId::new(line.a), PlantId::new(line.b), line.weight)?;
        }
        graph.validate()?;
        Ok(graph)
    }

    /// Flatten a graph back into records.
    pub fn from_graph(graph: &PowerGraph) -> Self {
        let plants = graph
            .plants()
            .map(|p| PlantRecord {
                id: p.id.value(),
                name: p.name.clone(),
                source: p.source,
                power_mw: p.power_output.value(),
            })
            .collect();
        let lines = graph
            .lines()
            .map(|(a, b, weight)| LineRecord {
                a: a.value(),
                b: b.value(),
                weight,
            })
            .collect();
        Self { plants, lines }
    }
}

/// Load a graph from a JSON file.
pub fn load_graph(path: impl AsRef<Path>) -> GridResult<PowerGraph> {
    let text = fs::read_to_string(path)?;
    let file: GraphFile =
        serde_json::from_str(&text).map_err(|e| GridError::Parse(e.to_string()))?;
    file.to_graph()
}

/// Save a graph to a JSON file (pretty-printed).
pub fn save_graph(path: impl AsRef<Path>, graph: &PowerGraph) -> GridResult<()> {
    let file = GraphFile::from_graph(graph);
    let text =
        serde_json::to_string_pretty(&file).map_err(|e| GridError::Parse(e.to_string()))?;
    fs::write(path, text)?;
    Ok(())
}
