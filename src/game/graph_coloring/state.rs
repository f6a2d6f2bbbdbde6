use super::graph::AdjacencyMatrix;
use super::rules::{get_valid_colors, num_colors_used, UNCOLORED};
use std::sync::Arc;

/// Snapshot of a graph coloring episode
///
/// Nodes are colored in the fixed order 0, 1, ..., N-1; `current_node_index`
/// always points at the next uncolored node. The action mask is derived from
/// the graph, the colors and the current node whenever a state is built.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphColoringState {
    adj_matrix: Arc<AdjacencyMatrix>,
    colors: Vec<i32>,
    current_node_index: usize,
    action_mask: Vec<bool>,
    num_colors: usize,
    steps: u32,
}

impl GraphColoringState {
    /// Fresh episode: every node uncolored, node 0 first
    pub fn new(adj_matrix: Arc<AdjacencyMatrix>, num_colors: usize) -> Self {
        let colors = vec![UNCOLORED; adj_matrix.num_nodes()];
        let action_mask = get_valid_colors(&adj_matrix, &colors, 0, num_colors);
        Self {
            adj_matrix,
            colors,
            current_node_index: 0,
            action_mask,
            num_colors,
            steps: 0,
        }
    }

    /// Successor state with the current node colored `color`
    ///
    /// Returns None when the color is out of range or held by a neighbor.
    pub fn color_current(&self, color: usize) -> Option<Self> {
        if !self.action_mask.get(color).copied().unwrap_or(false) {
            return None;
        }

        let mut colors = self.colors.clone();
        colors[self.current_node_index] = color as i32;

        let (current_node_index, action_mask) =
            match next_uncolored(&colors, self.current_node_index) {
                Some(next) => (
                    next,
                    get_valid_colors(&self.adj_matrix, &colors, next, self.num_colors),
                ),
                None => (self.current_node_index, vec![false; self.num_colors]),
            };

        Some(Self {
            adj_matrix: Arc::clone(&self.adj_matrix),
            colors,
            current_node_index,
            action_mask,
            num_colors: self.num_colors,
            steps: self.steps + 1,
        })
    }

    /// Copy of this state with the step counter advanced, colors unchanged
    pub(crate) fn advanced(&self) -> Self {
        let mut next = self.clone();
        next.steps += 1;
        next
    }

    pub fn adj_matrix(&self) -> &Arc<AdjacencyMatrix> {
        &self.adj_matrix
    }

    pub fn colors(&self) -> &[i32] {
        &self.colors
    }

    pub fn current_node_index(&self) -> usize {
        self.current_node_index
    }

    pub fn action_mask(&self) -> &[bool] {
        &self.action_mask
    }

    pub fn num_colors(&self) -> usize {
        self.num_colors
    }

    pub fn num_nodes(&self) -> usize {
        self.colors.len()
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn is_fully_colored(&self) -> bool {
        self.colors.iter().all(|&color| color != UNCOLORED)
    }

    /// Number of distinct colors assigned so far
    pub fn colors_used(&self) -> usize {
        num_colors_used(&self.colors)
    }
}

/// First uncolored node after `from` in visiting order, wrapping around
fn next_uncolored(colors: &[i32], from: usize) -> Option<usize> {
    let num_nodes = colors.len();
    (1..=num_nodes)
        .map(|offset| (from + offset) % num_nodes)
        .find(|&node| colors[node] == UNCOLORED)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> Arc<AdjacencyMatrix> {
        // 0 - 1 - 2
        Arc::new(AdjacencyMatrix::from_edges(3, &[(0, 1), (1, 2)]).unwrap())
    }

    #[test]
    fn test_new_state() {
        let state = GraphColoringState::new(path_graph(), 3);
        assert_eq!(state.colors(), &[UNCOLORED; 3]);
        assert_eq!(state.current_node_index(), 0);
        assert_eq!(state.action_mask(), &[true, true, true]);
        assert_eq!(state.steps(), 0);
        assert!(!state.is_fully_colored());
    }

    #[test]
    fn test_color_current_advances() {
        let state = GraphColoringState::new(path_graph(), 3);
        let next = state.color_current(1).unwrap();

        assert_eq!(next.colors(), &[1, UNCOLORED, UNCOLORED]);
        assert_eq!(next.current_node_index(), 1);
        assert_eq!(next.action_mask(), &[true, false, true]);
        assert_eq!(next.steps(), 1);
        // Snapshot semantics
        assert_eq!(state.colors(), &[UNCOLORED; 3]);
    }

    #[test]
    fn test_illegal_color_is_rejected() {
        let state = GraphColoringState::new(path_graph(), 2);
        let next = state.color_current(0).unwrap();
        assert!(next.color_current(0).is_none());
        assert!(next.color_current(2).is_none());
    }

    #[test]
    fn test_full_coloring_clears_mask() {
        let state = GraphColoringState::new(path_graph(), 2);
        let done = state
            .color_current(0)
            .and_then(|s| s.color_current(1))
            .and_then(|s| s.color_current(0))
            .unwrap();

        assert!(done.is_fully_colored());
        assert_eq!(done.action_mask(), &[false, false]);
        assert_eq!(done.colors_used(), 2);
        assert_eq!(done.steps(), 3);
    }

    #[test]
    fn test_next_uncolored_wraps() {
        let colors = [UNCOLORED, 0, 1, UNCOLORED];
        assert_eq!(next_uncolored(&colors, 0), Some(3));
        assert_eq!(next_uncolored(&colors, 3), Some(0));
        assert_eq!(next_uncolored(&[0, 1], 0), None);
    }
}
