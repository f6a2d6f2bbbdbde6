//! Graph coloring environment
//!
//! Nodes are colored one at a time in index order. Colors are stored as `i32`
//! with [`UNCOLORED`] (-1) for nodes that have no color yet.

pub mod env;
pub mod generator;
pub mod graph;
pub mod reward;
pub mod rules;
pub mod state;

pub use env::{GraphColoring, GraphColoringObservation};
pub use generator::{FixedGraphGenerator, RandomGraphGenerator};
pub use graph::AdjacencyMatrix;
pub use reward::ColorCountReward;
pub use rules::{get_valid_colors, is_proper_coloring, valid_colors_all_nodes, UNCOLORED};
pub use state::GraphColoringState;
