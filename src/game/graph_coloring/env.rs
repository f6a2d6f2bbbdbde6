use super::generator::RandomGraphGenerator;
use super::graph::AdjacencyMatrix;
use super::reward::ColorCountReward;
use super::rules::is_proper_coloring;
use super::state::GraphColoringState;
use crate::game::{Environment, Generator, RewardFn, StepInfo, StepResult};
use std::sync::Arc;
use tracing::{debug, trace};

/// What the agent sees at each step
#[derive(Debug, Clone, PartialEq)]
pub struct GraphColoringObservation {
    pub adj_matrix: Arc<AdjacencyMatrix>,
    pub colors: Vec<i32>,
    pub action_mask: Vec<bool>,
    pub current_node_index: usize,
}

type BoxedGenerator = Box<dyn Generator<State = GraphColoringState>>;
type BoxedReward = Box<dyn RewardFn<GraphColoringState, usize>>;

/// Graph coloring environment
///
/// Each action assigns a color index to the current node. The episode ends
/// when every node is colored, when an illegal color is chosen, or when the
/// next node has no legal color left.
pub struct GraphColoring {
    generator: BoxedGenerator,
    reward_fn: BoxedReward,
}

impl GraphColoring {
    pub fn new(
        generator: impl Generator<State = GraphColoringState> + 'static,
        reward_fn: impl RewardFn<GraphColoringState, usize> + 'static,
    ) -> Self {
        Self::from_boxed(Box::new(generator), Box::new(reward_fn))
    }

    pub fn from_boxed(generator: BoxedGenerator, reward_fn: BoxedReward) -> Self {
        Self {
            generator,
            reward_fn,
        }
    }
}

impl Default for GraphColoring {
    /// 20 nodes, edge probability 0.8, one color per node
    fn default() -> Self {
        let generator = RandomGraphGenerator::new(20, 0.8, 20)
            .unwrap_or_else(|_| unreachable!("default generator parameters are valid"));
        Self::new(generator, ColorCountReward)
    }
}

impl Environment for GraphColoring {
    type State = GraphColoringState;
    type Action = usize;
    type Observation = GraphColoringObservation;

    fn name(&self) -> &'static str {
        "graph_coloring"
    }

    fn reset(&self, seed: u64) -> (GraphColoringState, GraphColoringObservation) {
        let state = self.generator.generate(seed);
        debug!(
            seed,
            nodes = state.num_nodes(),
            colors = state.num_colors(),
            "graph coloring reset"
        );
        let observation = self.observe(&state);
        (state, observation)
    }

    fn step(
        &self,
        state: &GraphColoringState,
        action: usize,
    ) -> StepResult<GraphColoringState, GraphColoringObservation> {
        let (next_state, invalid_action) = match state.color_current(action) {
            Some(next) => (next, false),
            None => {
                debug!(
                    color = action,
                    node = state.current_node_index(),
                    "illegal color"
                );
                (state.advanced(), true)
            }
        };

        let all_nodes_colored = next_state.is_fully_colored();
        let no_actions_available = !next_state.action_mask().iter().any(|&legal| legal);
        let terminated = invalid_action || all_nodes_colored || no_actions_available;
        let reward = self
            .reward_fn
            .reward(state, &action, &next_state, terminated);
        let solved =
            all_nodes_colored && is_proper_coloring(next_state.adj_matrix(), next_state.colors());

        trace!(color = action, reward, terminated, solved, "graph coloring step");

        let observation = self.observe(&next_state);
        StepResult {
            state: next_state,
            observation,
            reward,
            terminated,
            info: StepInfo {
                invalid_action,
                solved,
            },
        }
    }

    fn observe(&self, state: &GraphColoringState) -> GraphColoringObservation {
        GraphColoringObservation {
            adj_matrix: Arc::clone(state.adj_matrix()),
            colors: state.colors().to_vec(),
            action_mask: state.action_mask().to_vec(),
            current_node_index: state.current_node_index(),
        }
    }

    fn legal_actions(&self, observation: &GraphColoringObservation) -> Vec<usize> {
        observation
            .action_mask
            .iter()
            .enumerate()
            .filter_map(|(color, &legal)| legal.then_some(color))
            .collect()
    }
}
