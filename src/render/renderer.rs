use std::fmt;

use crate::game::graph_coloring::UNCOLORED;
use crate::game::{GraphColoringObservation, SudokuObservation};

/// Board grid followed by a count of legal placements
pub fn render_sudoku(obs: &SudokuObservation) -> String {
    SudokuView(obs).to_string()
}

/// One line per node: its color and its neighbors
///
/// The current node is marked with `>`.
pub fn render_graph(obs: &GraphColoringObservation) -> String {
    GraphView(obs).to_string()
}

/// Text view of a Sudoku observation
pub struct SudokuView<'a>(pub &'a SudokuObservation);

impl fmt::Display for SudokuView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let obs = self.0;
        write!(f, "{}", obs.board)?;
        writeln!(
            f,
            "Filled: {}/81 | Legal actions: {}",
            obs.board.filled_count(),
            obs.action_mask.count()
        )
    }
}

/// Text view of a graph coloring observation
pub struct GraphView<'a>(pub &'a GraphColoringObservation);

impl fmt::Display for GraphView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let obs = self.0;
        let graph = &obs.adj_matrix;
        writeln!(
            f,
            "Nodes: {} | Edges: {} | Colors: {}",
            graph.num_nodes(),
            graph.num_edges(),
            obs.action_mask.len()
        )?;

        for (node, &color) in obs.colors.iter().enumerate() {
            let marker = if node == obs.current_node_index { '>' } else { ' ' };
            let color = if color == UNCOLORED {
                "-".to_string()
            } else {
                color.to_string()
            };
            write!(f, "{marker}{node:>3} [color {color:>2}] ->")?;
            for neighbor in graph.neighbors(node) {
                write!(f, " {neighbor}")?;
            }
            writeln!(f)?;
        }

        write!(f, "Legal colors:")?;
        for (color, _) in obs.action_mask.iter().enumerate().filter(|(_, &legal)| legal) {
            write!(f, " {color}")?;
        }
        writeln!(f)
    }
}
