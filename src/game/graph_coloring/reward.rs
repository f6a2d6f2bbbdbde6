use super::rules::UNCOLORED;
use super::state::GraphColoringState;
use crate::game::RewardFn;

/// Dense reward counting colors: -1 each time a color is used for the first
/// time, 0 when an existing color is reused
///
/// An illegal color costs -N, as if every node had needed a fresh color.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorCountReward;

impl RewardFn<GraphColoringState, usize> for ColorCountReward {
    fn reward(
        &self,
        state: &GraphColoringState,
        action: &usize,
        next_state: &GraphColoringState,
        _done: bool,
    ) -> f32 {
        let node = state.current_node_index();
        if next_state.colors()[node] == UNCOLORED {
            return -(state.num_nodes() as f32);
        }
        let color = *action as i32;
        if state.colors().contains(&color) {
            0.0
        } else {
            -1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::graph_coloring::graph::AdjacencyMatrix;
    use std::sync::Arc;

    #[test]
    fn test_new_and_reused_colors() {
        // Two isolated nodes
        let graph = Arc::new(AdjacencyMatrix::with_nodes(2).unwrap());
        let state = GraphColoringState::new(graph, 2);

        let first = state.color_current(0).unwrap();
        assert_eq!(ColorCountReward.reward(&state, &0, &first, false), -1.0);

        let reused = first.color_current(0).unwrap();
        assert_eq!(ColorCountReward.reward(&first, &0, &reused, true), 0.0);
    }

    #[test]
    fn test_invalid_color_penalty() {
        let graph = Arc::new(AdjacencyMatrix::from_edges(3, &[(0, 1)]).unwrap());
        let state = GraphColoringState::new(graph, 3).color_current(1).unwrap();
        let rejected = state.advanced();
        assert_eq!(ColorCountReward.reward(&state, &1, &rejected, true), -3.0);
    }
}
