//! Topological analysis helpers: connectivity stats, island detection, and
//! DOT export for external visualization tooling.

use crate::{GridError, GridResult, PowerGraph};
use petgraph::algo::connected_components;
use petgraph::visit::EdgeRef;
use std::collections::{HashSet, VecDeque};

/// Graph-level statistics (density/degree/connected components).
#[derive(Debug)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub connected_components: usize,
    pub min_degree: usize,
    pub avg_degree: f64,
    pub max_degree: usize,
    pub density: f64,
}

/// One connected component of the network.
#[derive(Debug)]
pub struct IslandSummary {
    pub island_id: usize,
    pub plant_count: usize,
    pub capacity_mw: f64,
}

/// Island assignment for a single plant, for tabular reporting.
#[derive(Debug)]
pub struct PlantAssignment {
    pub node_index: usize,
    pub label: String,
    pub island_id: usize,
}

/// Aggregated island analysis result.
#[derive(Debug)]
pub struct IslandAnalysis {
    pub islands: Vec<IslandSummary>,
    pub assignments: Vec<PlantAssignment>,
}

/// Calculates density, degree distribution, and component counts.
pub fn graph_stats(graph: &PowerGraph) -> GraphStats {
    let node_count = graph.graph.node_count();
    let edge_count = graph.graph.edge_count();
    let mut degrees = Vec::with_capacity(node_count);
    for node in graph.graph.node_indices() {
        degrees.push(graph.graph.neighbors(node).count());
    }
    let min_degree = *degrees.iter().min().unwrap_or(&0);
    let max_degree = *degrees.iter().max().unwrap_or(&0);
    let avg_degree = if node_count == 0 {
        0.0
    } else {
        degrees.iter().copied().sum::<usize>() as f64 / node_count as f64
    };
    let density = if node_count < 2 {
        0.0
    } else {
        2.0 * edge_count as f64 / (node_count as f64 * (node_count as f64 - 1.0))
    };
    GraphStats {
        node_count,
        edge_count,
        connected_components: connected_components(&graph.graph),
        min_degree,
        avg_degree,
        max_degree,
        density,
    }
}

/// Labels connected components (breadth-first search) and pulls island
/// metadata. A fleet spread over several islands can only ever be connected
/// by a spanning forest, not a single tree.
pub fn find_islands(graph: &PowerGraph) -> IslandAnalysis {
    let mut visited = HashSet::new();
    let mut islands = Vec::new();
    let mut assignments = Vec::new();
    let mut island_id = 0;
    for start in graph.graph.node_indices() {
        if visited.contains(&start) {
            continue;
        }
        let mut queue = VecDeque::new();
        queue.push_back(start);
        let mut members = Vec::new();
        while let Some(node) = queue.pop_front() {
            if !visited.insert(node) {
                continue;
            }
            members.push(node);
            for neighbor in graph.graph.neighbors(node) {
                if !visited.contains(&neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        if members.is_empty() {
            continue;
        }
        islands.push(IslandSummary {
            island_id,
            plant_count: members.len(),
            capacity_mw: members
                .iter()
                .map(|&ix| graph.graph[ix].power_output.value())
                .sum(),
        });
        for node in members {
            assignments.push(PlantAssignment {
                node_index: node.index(),
                label: graph.graph[node].name.clone(),
                island_id,
            });
        }
        island_id += 1;
    }
    assignments.sort_by_key(|assignment| assignment.node_index);
    IslandAnalysis {
        islands,
        assignments,
    }
}

/// Export the topology to a DOT string (Graphviz) so external tools can
/// visualize the layout.
pub fn export_graph(graph: &PowerGraph, format: &str) -> GridResult<String> {
    match format.to_ascii_lowercase().as_str() {
        "graphviz" | "dot" => Ok(render_dot(graph)),
        other => Err(GridError::Other(format!(
            "unsupported graph export format '{other}'"
        ))),
    }
}

fn render_dot(graph: &PowerGraph) -> String {
    let mut buffer = String::new();
    buffer.push_str("graph power_network {\n");
    for node in graph.graph.node_indices() {
        let plant = &graph.graph[node];
        buffer.push_str(&format!(
            "  n{} [label=\"{} ({}, {:.0} MW)\"];\n",
            node.index(),
            sanitize_label(&plant.name),
            plant.source,
            plant.power_output.value()
        ));
    }
    for edge in graph.graph.edge_references() {
        buffer.push_str(&format!(
            "  n{} -- n{} [label=\"{:.1}\"];\n",
            edge.source().index(),
            edge.target().index(),
            edge.weight().weight
        ));
    }
    buffer.push('}');
    buffer
}

fn sanitize_label(label: &str) -> String {
    label.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EnergySource, Plant, PlantId};

    fn split_graph() -> PowerGraph {
        let mut g = PowerGraph::new();
        for (i, mw) in [(0, 100.0), (1, 150.0), (2, 80.0), (3, 60.0)] {
            g.add_plant(Plant::new(PlantId::new(i), format!("P{i}"), EnergySource::Wind, mw));
        }
        g.connect(PlantId::new(0), PlantId::new(1), 10.0).unwrap();
        g.connect(PlantId::new(2), PlantId::new(3), 8.0).unwrap();
        g
    }

    #[test]
    fn test_graph_stats() {
        let stats = graph_stats(&split_graph());
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.connected_components, 2);
        assert_eq!(stats.min_degree, 1);
        assert_eq!(stats.max_degree, 1);
        assert!((stats.density - 2.0 * 2.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_find_islands() {
        let analysis = find_islands(&split_graph());
        assert_eq!(analysis.islands.len(), 2);
        assert_eq!(analysis.assignments.len(), 4);
        assert!((analysis.islands[0].capacity_mw - 250.0).abs() < 1e-9);
        assert!((analysis.islands[1].capacity_mw - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_export_dot() {
        let dot = export_graph(&split_graph(), "dot").unwrap();
        assert!(dot.starts_with("graph power_network {"));
        assert!(dot.contains("P0 (Wind, 100 MW)"));
        assert!(dot.contains("--"));
        assert!(export_graph(&split_graph(), "svg").is_err());
    }
}
