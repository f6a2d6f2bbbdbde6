//! Initial-state generators for graph coloring episodes

use super::graph::AdjacencyMatrix;
use super::state::GraphColoringState;
use crate::error::{PuzzleError, Result};
use crate::game::Generator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::debug;

const PETERSEN_EDGES: [(usize, usize); 15] = [
    // Outer cycle
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (4, 0),
    // Spokes
    (0, 5),
    (1, 6),
    (2, 7),
    (3, 8),
    (4, 9),
    // Inner pentagram
    (5, 7),
    (7, 9),
    (9, 6),
    (6, 8),
    (8, 5),
];

fn check_num_colors(num_colors: usize) -> Result<()> {
    if num_colors == 0 {
        return Err(PuzzleError::Config(
            "num_colors must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Always generates the same graph, for debugging
#[derive(Debug, Clone)]
pub struct FixedGraphGenerator {
    adj_matrix: Arc<AdjacencyMatrix>,
    num_colors: usize,
}

impl FixedGraphGenerator {
    pub fn new(adj_matrix: AdjacencyMatrix, num_colors: usize) -> Result<Self> {
        check_num_colors(num_colors)?;
        Ok(Self {
            adj_matrix: Arc::new(adj_matrix),
            num_colors,
        })
    }

    /// The Petersen graph (10 nodes, 15 edges, chromatic number 3) with one
    /// color available per node
    pub fn petersen() -> Self {
        let mut adj_matrix = AdjacencyMatrix::empty(10);
        for (a, b) in PETERSEN_EDGES {
            adj_matrix.add_edge(a, b);
        }
        Self {
            adj_matrix: Arc::new(adj_matrix),
            num_colors: 10,
        }
    }

    pub fn adj_matrix(&self) -> &AdjacencyMatrix {
        &self.adj_matrix
    }

    pub fn num_colors(&self) -> usize {
        self.num_colors
    }
}

impl Default for FixedGraphGenerator {
    fn default() -> Self {
        Self::petersen()
    }
}

impl Generator for FixedGraphGenerator {
    type State = GraphColoringState;

    fn generate(&self, _seed: u64) -> GraphColoringState {
        GraphColoringState::new(Arc::clone(&self.adj_matrix), self.num_colors)
    }
}

/// Erdős–Rényi random graphs: every node pair is joined with probability
/// `edge_probability`
#[derive(Debug, Clone)]
pub struct RandomGraphGenerator {
    num_nodes: usize,
    edge_probability: f64,
    num_colors: usize,
}

impl RandomGraphGenerator {
    pub fn new(num_nodes: usize, edge_probability: f64, num_colors: usize) -> Result<Self> {
        if num_nodes == 0 {
            return Err(PuzzleError::Config(
                "num_nodes must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&edge_probability) {
            return Err(PuzzleError::Config(format!(
                "edge_probability must be in [0, 1], got {edge_probability}"
            )));
        }
        check_num_colors(num_colors)?;
        Ok(Self {
            num_nodes,
            edge_probability,
            num_colors,
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_colors(&self) -> usize {
        self.num_colors
    }

    /// Graph drawn for `seed`
    pub fn sample_graph(&self, seed: u64) -> AdjacencyMatrix {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut adj_matrix = AdjacencyMatrix::empty(self.num_nodes);
        for i in 0..self.num_nodes {
            for j in (i + 1)..self.num_nodes {
                if rng.gen_bool(self.edge_probability) {
                    adj_matrix.add_edge(i, j);
                }
            }
        }
        adj_matrix
    }
}

impl Generator for RandomGraphGenerator {
    type State = GraphColoringState;

    fn generate(&self, seed: u64) -> GraphColoringState {
        let adj_matrix = self.sample_graph(seed);
        debug!(seed, edges = adj_matrix.num_edges(), "sampled graph");
        GraphColoringState::new(Arc::new(adj_matrix), self.num_colors)
    }
}
