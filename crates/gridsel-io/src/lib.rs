//! # gridsel-io: Graph Persistence and Generation
//!
//! Loads and saves study networks as JSON and generates reproducible random
//! networks for benchmarking the selection strategies.
//!
//! The wire format is a flat record schema (`plants` + `lines`); the graph
//! structure is rebuilt and cross-checked on load, so a file whose lines
//! reference missing plants is rejected before it reaches any algorithm.

pub mod format;
pub mod generate;

pub use format::{load_graph, save_graph, GraphFile, LineRecord, PlantRecord};
pub use generate::{random_power_graph, GeneratorConfig};
