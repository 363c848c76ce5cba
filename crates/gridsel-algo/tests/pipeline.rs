//! End-to-end pipeline scenarios on a small reference network.

use gridsel_algo::{
    pipeline, GreedyByPower, HeuristicScore, PlanRunner, PriorityTiered, SelectError,
    SelectionStrategy,
};
use gridsel_core::{EnergySource, Megawatts, Plant, PlantId, PowerGraph};
use gridsel_io::{random_power_graph, GeneratorConfig};

/// Reference network: A Solar 100, B Coal 150, C Wind 80, D Hydro 60;
/// lines A-B 10, B-C 5, C-D 8, A-D 20.
fn reference_graph() -> PowerGraph {
    let mut g = PowerGraph::new();
    g.add_plant(Plant::new(PlantId::new(0), "A", EnergySource::Solar, 100.0));
    g.add_plant(Plant::new(PlantId::new(1), "B", EnergySource::Coal, 150.0));
    g.add_plant(Plant::new(PlantId::new(2), "C", EnergySource::Wind, 80.0));
    g.add_plant(Plant::new(PlantId::new(3), "D", EnergySource::Hydro, 60.0));
    g.connect(PlantId::new(0), PlantId::new(1), 10.0).unwrap();
    g.connect(PlantId::new(1), PlantId::new(2), 5.0).unwrap();
    g.connect(PlantId::new(2), PlantId::new(3), 8.0).unwrap();
    g.connect(PlantId::new(0), PlantId::new(3), 20.0).unwrap();
    g
}

#[test]
fn greedy_picks_biggest_two_and_their_line() {
    let metrics = pipeline::run(&reference_graph(), &GreedyByPower, Megawatts(200.0)).unwrap();
    // B (150) then A (100); stops at 250 >= 200
    assert_eq!(
        metrics.selection.plants,
        vec![PlantId::new(1), PlantId::new(0)]
    );
    assert_eq!(metrics.selection.total_power, Megawatts(250.0));
    // Induced subgraph has exactly the A-B line
    assert_eq!(metrics.forest.edges.len(), 1);
    assert!((metrics.forest.total_cost - 10.0).abs() < 1e-9);
    assert_eq!(metrics.forest.components, 1);
    assert_eq!(metrics.breakdown.coal, 1);
    assert_eq!(metrics.breakdown.solar, 1);
}

#[test]
fn tiered_prefers_clean_tiers_and_spans_with_two_lines() {
    let metrics =
        pipeline::run(&reference_graph(), &PriorityTiered { inflation: 0.0 }, Megawatts(200.0))
            .unwrap();
    // Solar A (100), Wind C (180), Hydro D (240 >= 200)
    assert_eq!(
        metrics.selection.plants,
        vec![PlantId::new(0), PlantId::new(2), PlantId::new(3)]
    );
    assert_eq!(metrics.selection.total_power, Megawatts(240.0));
    // Induced lines are C-D (8) and A-D (20); three plants need both
    assert_eq!(metrics.forest.edges.len(), 2);
    assert!((metrics.forest.total_cost - 28.0).abs() < 1e-9);
    assert_eq!(metrics.forest.components, 1);
    assert_eq!(metrics.breakdown.coal, 0);
}

#[test]
fn tiered_default_inflates_planning_cost_only() {
    let g = reference_graph();
    let metrics = pipeline::run(&g, &PriorityTiered::default(), Megawatts(200.0)).unwrap();
    assert!((metrics.forest.total_cost - 28.0 * 1.02).abs() < 1e-9);
    // The shared graph keeps its raw weights
    let weights: Vec<f64> = g.lines().map(|(_, _, w)| w).collect();
    assert_eq!(weights, vec![10.0, 5.0, 8.0, 20.0]);
}

#[test]
fn insufficient_capacity_from_every_heuristic() {
    let g = reference_graph();
    let expected = SelectError::InsufficientCapacity {
        demand: Megawatts(1000.0),
        available: Megawatts(390.0),
    };
    for strategy in [
        &GreedyByPower as &dyn SelectionStrategy,
        &HeuristicScore::default(),
        &PriorityTiered::default(),
    ] {
        let err = pipeline::run(&g, strategy, Megawatts(1000.0)).unwrap_err();
        assert_eq!(err, expected, "strategy {}", strategy.id());
    }
}

#[cfg(feature = "solver-highs")]
#[test]
fn exact_reports_certified_infeasibility() {
    let err = pipeline::run(
        &reference_graph(),
        &gridsel_algo::ExactOptimization::default(),
        Megawatts(1000.0),
    )
    .unwrap_err();
    assert_eq!(
        err,
        SelectError::Infeasible {
            demand: Megawatts(1000.0)
        }
    );
}

#[cfg(feature = "solver-highs")]
#[test]
fn exact_meets_demand_on_reference_graph() {
    let metrics = pipeline::run(
        &reference_graph(),
        &gridsel_algo::ExactOptimization::default(),
        Megawatts(200.0),
    )
    .unwrap();
    assert!(metrics.selection.total_power.value() >= 200.0);
    assert_eq!(metrics.breakdown.total(), metrics.selection.plants.len());
}

#[test]
fn all_strategies_meet_demand_and_are_deterministic() {
    let graph = random_power_graph(&GeneratorConfig {
        plants: 60,
        seed: 9,
        ..GeneratorConfig::default()
    });
    let demand = Megawatts(graph.total_capacity().value() * 0.5);

    let runner = PlanRunner::standard();
    let first = runner.run_all(&graph, demand);
    let second = runner.run_all(&graph, demand);
    assert_eq!(first.len(), second.len());
    for ((id_a, a), (_, b)) in first.iter().zip(second.iter()) {
        let a = a.as_ref().unwrap_or_else(|e| panic!("{id_a}: {e}"));
        let b = b.as_ref().unwrap();
        assert_eq!(a, b, "strategy {id_a} must be deterministic");
        assert!(a.selection.total_power.value() >= demand.value());
        assert_eq!(a.breakdown.total(), a.selection.plants.len());
        assert!(a.op_count > 0);
    }
}

#[test]
fn disconnected_selection_is_reported_as_forest() {
    let mut g = PowerGraph::new();
    // Two clean islands plus an unreachable coal plant
    g.add_plant(Plant::new(PlantId::new(0), "A", EnergySource::Solar, 90.0));
    g.add_plant(Plant::new(PlantId::new(1), "B", EnergySource::Solar, 80.0));
    g.add_plant(Plant::new(PlantId::new(2), "C", EnergySource::Wind, 70.0));
    g.add_plant(Plant::new(PlantId::new(3), "D", EnergySource::Coal, 500.0));
    g.connect(PlantId::new(0), PlantId::new(1), 4.0).unwrap();

    let metrics = pipeline::run(&g, &PriorityTiered { inflation: 0.0 }, Megawatts(230.0)).unwrap();
    // Solar tier: A, B (170); Wind tier: C (240 >= 230). C is isolated.
    assert_eq!(
        metrics.selection.plants,
        vec![PlantId::new(0), PlantId::new(1), PlantId::new(2)]
    );
    assert_eq!(metrics.forest.components, 2);
    assert!(metrics.forest.is_forest());
    assert!((metrics.forest.total_cost - 4.0).abs() < 1e-9);
}

#[test]
fn greedy_stopping_rule_is_minimal() {
    let graph = random_power_graph(&GeneratorConfig {
        plants: 40,
        seed: 3,
        ..GeneratorConfig::default()
    });
    let demand = Megawatts(graph.total_capacity().value() * 0.6);
    let metrics = pipeline::run(&graph, &GreedyByPower, demand).unwrap();
    let selected = &metrics.selection.plants;
    let last = *selected.last().unwrap();
    let without_last: f64 = selected
        .iter()
        .filter(|&&id| id != last)
        .map(|id| graph.plant(*id).unwrap().power_output.value())
        .sum();
    assert!(without_last < demand.value());
}
