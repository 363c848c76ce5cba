//! Command-line driver for selection studies.
//!
//! Loads or generates a study network, runs one or all selection strategies
//! against a demand target, and renders the comparison. Rendering is purely
//! presentational; the structured results come from gridsel-algo unchanged.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gridsel_algo::{
    ExactOptimization, GreedyByPower, HeuristicScore, PlanRunner, PriorityTiered, RunMetrics,
    SelectError, SelectionMethod, SelectionStrategy,
};
use gridsel_core::{export_graph, find_islands, graph_stats, Megawatts, PowerGraph};
use gridsel_io::{load_graph, random_power_graph, save_graph, GeneratorConfig};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tabwriter::TabWriter;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "gridsel", version, about = "Clean-generation selection studies")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random study network and write it as JSON
    Generate {
        /// Output path
        output: PathBuf,
        /// Number of plants
        #[arg(long, default_value_t = 50)]
        plants: usize,
        /// Probability of a line between each plant pair
        #[arg(long, default_value_t = 0.1)]
        edge_probability: f64,
        /// RNG seed for reproducible networks
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Print statistics for a network file
    Stats {
        /// Network JSON path
        graph: PathBuf,
    },
    /// Run selection strategies against a demand target
    Plan {
        /// Network JSON path
        graph: PathBuf,
        /// Demand target in MW
        #[arg(long)]
        demand: f64,
        /// Single strategy to run (greedy|heuristic|tiered|exact); all when omitted
        #[arg(long)]
        method: Option<String>,
        /// Clean-score weight (heuristic and exact)
        #[arg(long)]
        alpha: Option<f64>,
        /// Connectivity weight (heuristic) / plant-count weight (exact)
        #[arg(long)]
        beta: Option<f64>,
        /// Incident-edge-weight penalty (exact)
        #[arg(long)]
        gamma: Option<f64>,
        /// Planning surcharge on connection costs (tiered)
        #[arg(long)]
        inflation: Option<f64>,
        /// Solver time budget in seconds (exact)
        #[arg(long, default_value_t = 300)]
        timeout_secs: u64,
        /// Emit results as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Export the network topology (graphviz/dot)
    Export {
        /// Network JSON path
        graph: PathBuf,
        /// Output format
        #[arg(long, default_value = "dot")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    match cli.command {
        Commands::Generate {
            output,
            plants,
            edge_probability,
            seed,
        } => generate(output, plants, edge_probability, seed),
        Commands::Stats { graph } => stats(graph),
        Commands::Plan {
            graph,
            demand,
            method,
            alpha,
            beta,
            gamma,
            inflation,
            timeout_secs,
            json,
        } => plan(
            graph,
            demand,
            method,
            StrategyOverrides {
                alpha,
                beta,
                gamma,
                inflation,
                timeout: Duration::from_secs(timeout_secs),
            },
            json,
        ),
        Commands::Export { graph, format } => export(graph, format),
    }
}

fn generate(output: PathBuf, plants: usize, edge_probability: f64, seed: u64) -> Result<()> {
    let config = GeneratorConfig {
        plants,
        edge_probability,
        seed,
        ..GeneratorConfig::default()
    };
    let graph = random_power_graph(&config);
    save_graph(&output, &graph).with_context(|| format!("writing {}", output.display()))?;
    info!(plants, edges = graph.graph.edge_count(), "network generated");
    println!("{}", graph.stats());
    println!("Saved to {}", output.display());
    Ok(())
}

fn stats(path: PathBuf) -> Result<()> {
    let graph = load(&path)?;
    println!("{}", graph.stats());
    let topo = graph_stats(&graph);
    println!(
        "density {:.4}, degree {}..{} (avg {:.2}), {} component(s)",
        topo.density, topo.min_degree, topo.max_degree, topo.avg_degree, topo.connected_components
    );
    let islands = find_islands(&graph);
    if islands.islands.len() > 1 {
        let mut writer = TabWriter::new(io::stdout());
        writeln!(writer, "ISLAND\tPLANTS\tCAPACITY (MW)")?;
        for island in &islands.islands {
            writeln!(
                writer,
                "{}\t{}\t{:.0}",
                island.island_id, island.plant_count, island.capacity_mw
            )?;
        }
        writer.flush()?;
    }
    Ok(())
}

/// Caller-supplied parameter overrides; strategy defaults fill the gaps.
struct StrategyOverrides {
    alpha: Option<f64>,
    beta: Option<f64>,
    gamma: Option<f64>,
    inflation: Option<f64>,
    timeout: Duration,
}

fn build_strategy(
    method: SelectionMethod,
    overrides: &StrategyOverrides,
) -> Box<dyn SelectionStrategy> {
    match method {
        SelectionMethod::GreedyPower => Box::new(GreedyByPower),
        SelectionMethod::Heuristic => {
            let defaults = HeuristicScore::default();
            Box::new(HeuristicScore {
                alpha: overrides.alpha.unwrap_or(defaults.alpha),
                beta: overrides.beta.unwrap_or(defaults.beta),
            })
        }
        SelectionMethod::Tiered => {
            let defaults = PriorityTiered::default();
            Box::new(PriorityTiered {
                inflation: overrides.inflation.unwrap_or(defaults.inflation),
            })
        }
        SelectionMethod::Exact => Box::new(
            ExactOptimization::new(
                overrides.alpha.unwrap_or(ExactOptimization::DEFAULT_ALPHA),
                overrides.beta.unwrap_or(ExactOptimization::DEFAULT_BETA),
                overrides.gamma.unwrap_or(ExactOptimization::DEFAULT_GAMMA),
                Box::new(gridsel_algo::GoodLpBackend),
            )
            .with_timeout(overrides.timeout),
        ),
    }
}

fn plan(
    path: PathBuf,
    demand_mw: f64,
    method: Option<String>,
    overrides: StrategyOverrides,
    json: bool,
) -> Result<()> {
    let graph = load(&path)?;
    let demand = Megawatts(demand_mw);

    let methods: Vec<SelectionMethod> = match method {
        Some(name) => vec![name
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?],
        None => SelectionMethod::ALL.to_vec(),
    };
    let mut runner = PlanRunner::new();
    for m in &methods {
        runner = runner.with_strategy(build_strategy(*m, &overrides));
    }

    let results = runner.run_all(&graph, demand);
    if json {
        return emit_json(&results);
    }

    for (id, result) in &results {
        match result {
            Ok(metrics) => render_run(&graph, metrics)?,
            Err(err) => println!("\n== {id}: FAILED: {err}"),
        }
    }
    render_comparison(&results)
}

fn render_run(graph: &PowerGraph, metrics: &RunMetrics) -> Result<()> {
    println!("\n== {} ==", metrics.method);
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "PLANT\tSOURCE\tPOWER (MW)")?;
    for id in &metrics.selection.plants {
        if let Some(plant) = graph.plant(*id) {
            writeln!(
                writer,
                "{}\t{}\t{:.0}",
                plant.name,
                plant.source,
                plant.power_output.value()
            )?;
        }
    }
    writer.flush()?;
    println!(
        "Total selected power: {} (demand {})",
        metrics.selection.total_power, metrics.selection.demand
    );
    println!("Energy breakdown: {}", metrics.breakdown);

    let kind = if metrics.forest.is_forest() {
        format!("spanning forest ({} trees)", metrics.forest.components)
    } else {
        "spanning tree".to_string()
    };
    println!("Connection {kind}:");
    for edge in &metrics.forest.edges {
        let a = graph.plant(edge.a).map(|p| p.name.as_str()).unwrap_or("?");
        let b = graph.plant(edge.b).map(|p| p.name.as_str()).unwrap_or("?");
        println!("  {} - {} (cost {:.2})", a, b, edge.weight);
    }
    println!("Total connection cost: {:.2}", metrics.forest.total_cost);
    Ok(())
}

fn render_comparison(results: &[(String, Result<RunMetrics, SelectError>)]) -> Result<()> {
    println!();
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "METHOD\tPLANTS\tPOWER (MW)\tCOST\tTREES\tOPS")?;
    for (id, result) in results {
        match result {
            Ok(m) => writeln!(
                writer,
                "{}\t{}\t{:.0}\t{:.2}\t{}\t{}",
                id,
                m.selection.plants.len(),
                m.selection.total_power.value(),
                m.forest.total_cost,
                m.forest.components,
                m.op_count
            )?,
            Err(err) => writeln!(writer, "{}\t-\t-\t-\t-\t{}", id, err)?,
        }
    }
    writer.flush()?;
    Ok(())
}

fn emit_json(results: &[(String, Result<RunMetrics, SelectError>)]) -> Result<()> {
    let value: Vec<serde_json::Value> = results
        .iter()
        .map(|(id, result)| match result {
            Ok(metrics) => serde_json::json!({
                "strategy": id,
                "metrics": metrics,
            }),
            Err(err) => serde_json::json!({
                "strategy": id,
                "error": err.to_string(),
            }),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn export(path: PathBuf, format: String) -> Result<()> {
    let graph = load(&path)?;
    match export_graph(&graph, &format) {
        Ok(rendered) => {
            println!("{rendered}");
            Ok(())
        }
        Err(err) => bail!("{err}"),
    }
}

fn load(path: &PathBuf) -> Result<PowerGraph> {
    let graph = load_graph(path).with_context(|| format!("loading {}", path.display()))?;
    info!(stats = %graph.stats(), "network loaded");
    Ok(graph)
}
