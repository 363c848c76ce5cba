//! Minimum spanning forest over an induced subgraph.
//!
//! Kruskal's construction: edges in ascending weight order, kept iff their
//! endpoints sit in different components, with union-find tracking. Ties are
//! broken by the normalized endpoint ID pair so the output is reproducible
//! regardless of edge insertion order. A disconnected selection yields one
//! tree per component; the result reports the component count so callers can
//! tell a forest from a single tree.

use crate::metrics::OpCounter;
use gridsel_core::{PlantId, PowerGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use serde::Serialize;

/// A kept forest edge, endpoints normalized so `a <= b`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForestEdge {
    pub a: PlantId,
    pub b: PlantId,
    pub weight: f64,
}

/// Minimum-cost acyclic edge set connecting each component of the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanningForest {
    pub edges: Vec<ForestEdge>,
    /// Sum of kept edge weights across all components.
    pub total_cost: f64,
    /// Number of trees. More than one means the input was disconnected and
    /// this is a forest, not a single spanning tree.
    pub components: usize,
}

impl SpanningForest {
    pub fn is_forest(&self) -> bool {
        self.components > 1
    }
}

/// Compute the minimum spanning forest of `subgraph`.
///
/// The input is expected to already be an induced subgraph (a private copy
/// when the strategy applies a planning surcharge); this function never
/// mutates it. An isolated plant contributes an empty-edge tree at zero
/// cost.
pub fn minimum_spanning_forest(subgraph: &PowerGraph, ops: &mut OpCounter) -> SpanningForest {
    let n = subgraph.graph.node_count();
    if n == 0 {
        return SpanningForest {
            edges: Vec::new(),
            total_cost: 0.0,
            components: 0,
        };
    }

    let mut candidates: Vec<(f64, PlantId, PlantId, usize, usize)> = subgraph
        .graph
        .edge_references()
        .map(|e| {
            let (u, v) = (e.source(), e.target());
            let (id_u, id_v) = (subgraph.graph[u].id, subgraph.graph[v].id);
            let (a, b) = if id_u <= id_v { (id_u, id_v) } else { (id_v, id_u) };
            (e.weight().weight, a, b, u.index(), v.index())
        })
        .collect();
    candidates.sort_by(|x, y| {
        x.0.total_cmp(&y.0)
            .then_with(|| x.1.cmp(&y.1))
            .then_with(|| x.2.cmp(&y.2))
    });
    ops.record_sort(candidates.len());

    let mut components = UnionFind::<usize>::new(n);
    let mut edges = Vec::new();
    let mut total_cost = 0.0;
    for (weight, a, b, u, v) in candidates {
        ops.record(1);
        if components.union(u, v) {
            total_cost += weight;
            edges.push(ForestEdge { a, b, weight });
            if edges.len() == n - 1 {
                break;
            }
        }
    }

    SpanningForest {
        components: n - edges.len(),
        edges,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsel_core::{EnergySource, Plant, PlantId};

    fn graph(nodes: usize, lines: &[(usize, usize, f64)]) -> PowerGraph {
        let mut g = PowerGraph::new();
        for i in 0..nodes {
            g.add_plant(Plant::new(PlantId::new(i), format!("P{i}"), EnergySource::Wind, 50.0));
        }
        for &(a, b, w) in lines {
            g.connect(PlantId::new(a), PlantId::new(b), w).unwrap();
        }
        g
    }

    #[test]
    fn test_single_tree() {
        // Square with one diagonal; MST drops the two heaviest edges
        let g = graph(4, &[(0, 1, 1.0), (1, 2, 2.0), (2, 3, 3.0), (3, 0, 4.0), (0, 2, 5.0)]);
        let mut ops = OpCounter::new();
        let forest = minimum_spanning_forest(&g, &mut ops);
        assert_eq!(forest.components, 1);
        assert!(!forest.is_forest());
        assert_eq!(forest.edges.len(), 3);
        assert!((forest.total_cost - 6.0).abs() < 1e-9);
        assert!(ops.total() > 0);
    }

    #[test]
    fn test_disconnected_reports_forest() {
        let g = graph(5, &[(0, 1, 1.0), (2, 3, 2.0)]);
        let mut ops = OpCounter::new();
        let forest = minimum_spanning_forest(&g, &mut ops);
        // Three components: {0,1}, {2,3}, {4}
        assert_eq!(forest.components, 3);
        assert!(forest.is_forest());
        assert_eq!(forest.edges.len(), 2);
        assert!((forest.total_cost - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_isolated_plant_zero_cost() {
        let g = graph(1, &[]);
        let mut ops = OpCounter::new();
        let forest = minimum_spanning_forest(&g, &mut ops);
        assert_eq!(forest.components, 1);
        assert!(forest.edges.is_empty());
        assert_eq!(forest.total_cost, 0.0);
    }

    #[test]
    fn test_empty_input() {
        let g = graph(0, &[]);
        let mut ops = OpCounter::new();
        let forest = minimum_spanning_forest(&g, &mut ops);
        assert_eq!(forest.components, 0);
        assert!(forest.edges.is_empty());
    }

    #[test]
    fn test_tie_break_deterministic() {
        // All weights equal: kept edges are decided by the ID-pair ordering
        let g = graph(3, &[(0, 1, 5.0), (1, 2, 5.0), (0, 2, 5.0)]);
        let forest = minimum_spanning_forest(&g, &mut OpCounter::new());
        assert_eq!(forest.edges.len(), 2);
        assert_eq!(
            (forest.edges[0].a, forest.edges[0].b),
            (PlantId::new(0), PlantId::new(1))
        );
        assert_eq!(
            (forest.edges[1].a, forest.edges[1].b),
            (PlantId::new(0), PlantId::new(2))
        );
    }

    #[test]
    fn test_cost_no_worse_than_alternative_forest() {
        // Any other spanning edge set over the same component costs at least
        // as much as the Kruskal result
        let g = graph(4, &[(0, 1, 1.0), (1, 2, 10.0), (0, 2, 2.0), (2, 3, 1.0), (1, 3, 3.0)]);
        let forest = minimum_spanning_forest(&g, &mut OpCounter::new());
        // Optimum: 0-1 (1) + 2-3 (1) + 0-2 (2) = 4
        assert!((forest.total_cost - 4.0).abs() < 1e-9);
        // Alternative tree 0-1, 1-2, 2-3 costs 12; Kruskal must beat it
        assert!(forest.total_cost <= 12.0);
    }

    #[test]
    fn test_input_not_mutated() {
        let g = graph(3, &[(0, 1, 1.0), (1, 2, 2.0)]);
        let before: Vec<f64> = g.graph.edge_weights().map(|l| l.weight).collect();
        let _ = minimum_spanning_forest(&g, &mut OpCounter::new());
        let after: Vec<f64> = g.graph.edge_weights().map(|l| l.weight).collect();
        assert_eq!(before, after);
    }
}
