use burn::tensor::{backend::Backend, Bool, Tensor, TensorData};

use crate::game::graph_coloring::UNCOLORED;
use crate::game::sudoku::{Board, SudokuActionMask, BOARD_WIDTH, NUM_ACTIONS};
use crate::game::{GraphColoringObservation, SudokuObservation};

/// Board tensor with shape [1, 9, 9]
///
/// Each cell holds `value / 9 - 0.5`, where empty cells have value -1 and
/// digits are 0-8.
pub fn sudoku_board_tensor<B: Backend>(board: &Board, device: &B::Device) -> Tensor<B, 3> {
    let data: Vec<f32> = board
        .cells()
        .iter()
        .flatten()
        .map(|&cell| cell as f32 / BOARD_WIDTH as f32 - 0.5)
        .collect();

    let tensor_data = TensorData::new(data, [1, BOARD_WIDTH, BOARD_WIDTH]);

    Tensor::<B, 3>::from_data(tensor_data, device)
}

/// Flat legal-action mask with shape [729], indexed like `SudokuAction::index`
pub fn sudoku_mask_tensor<B: Backend>(
    mask: &SudokuActionMask,
    device: &B::Device,
) -> Tensor<B, 1, Bool> {
    let tensor_data = TensorData::new(mask.to_flat(), [NUM_ACTIONS]);

    Tensor::<B, 1, Bool>::from_data(tensor_data, device)
}

/// Stack observations into `([B, 1, 9, 9], [B, 729])`
///
/// `observations` must not be empty.
pub fn sudoku_batch<B: Backend>(
    observations: &[SudokuObservation],
    device: &B::Device,
) -> (Tensor<B, 4>, Tensor<B, 2, Bool>) {
    let boards = observations
        .iter()
        .map(|obs| sudoku_board_tensor::<B>(&obs.board, device))
        .collect();
    let masks = observations
        .iter()
        .map(|obs| sudoku_mask_tensor::<B>(&obs.action_mask, device))
        .collect();

    (Tensor::stack(boards, 0), Tensor::stack(masks, 0))
}

/// Length of the graph coloring feature vector for `num_nodes` nodes and
/// `num_colors` colors
pub fn graph_feature_dim(num_nodes: usize, num_colors: usize) -> usize {
    num_nodes * num_nodes + num_nodes * num_colors + num_nodes
}

/// Flat feature vector of a graph coloring observation
///
/// Layout: adjacency matrix (N*N), one-hot color per node (N*K, all zeros for
/// uncolored nodes), one-hot current node (N).
pub fn graph_features(obs: &GraphColoringObservation) -> Vec<f32> {
    let num_nodes = obs.colors.len();
    let num_colors = obs.action_mask.len();
    let mut features = Vec::with_capacity(graph_feature_dim(num_nodes, num_colors));

    features.extend(
        obs.adj_matrix
            .entries()
            .iter()
            .map(|&adjacent| if adjacent { 1.0 } else { 0.0 }),
    );

    for &color in &obs.colors {
        let mut one_hot = vec![0.0; num_colors];
        if color != UNCOLORED && (color as usize) < num_colors {
            one_hot[color as usize] = 1.0;
        }
        features.extend(one_hot);
    }

    let mut current = vec![0.0; num_nodes];
    current[obs.current_node_index] = 1.0;
    features.extend(current);

    features
}

/// Feature tensor with shape [graph_feature_dim(N, K)]
pub fn graph_feature_tensor<B: Backend>(
    obs: &GraphColoringObservation,
    device: &B::Device,
) -> Tensor<B, 1> {
    let features = graph_features(obs);
    let len = features.len();

    Tensor::<B, 1>::from_data(TensorData::new(features, [len]), device)
}

/// Legal-color mask with shape [K]
pub fn graph_mask_tensor<B: Backend>(
    obs: &GraphColoringObservation,
    device: &B::Device,
) -> Tensor<B, 1, Bool> {
    let tensor_data = TensorData::new(obs.action_mask.clone(), [obs.action_mask.len()]);

    Tensor::<B, 1, Bool>::from_data(tensor_data, device)
}

/// Stack observations of equally sized graphs into `([B, F], [B, K])`
///
/// `observations` must not be empty.
pub fn graph_batch<B: Backend>(
    observations: &[GraphColoringObservation],
    device: &B::Device,
) -> (Tensor<B, 2>, Tensor<B, 2, Bool>) {
    let features = observations
        .iter()
        .map(|obs| graph_feature_tensor::<B>(obs, device))
        .collect();
    let masks = observations
        .iter()
        .map(|obs| graph_mask_tensor::<B>(obs, device))
        .collect();

    (Tensor::stack(features, 0), Tensor::stack(masks, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::graph_coloring::{AdjacencyMatrix, FixedGraphGenerator};
    use crate::game::sudoku::{DummyGenerator, SudokuAction};
    use crate::game::{Environment, GraphColoring, Sudoku};
    use burn::backend::ndarray::NdArrayDevice;
    use burn::backend::NdArray;
    use std::sync::Arc;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_board_tensor_values() {
        let device = NdArrayDevice::default();
        let board = *DummyGenerator::new().board();

        let tensor = sudoku_board_tensor::<TestBackend>(&board, &device);
        assert_eq!(tensor.dims(), [1, 9, 9]);

        let data = tensor.to_data();
        let values = data.as_slice::<f32>().unwrap();
        // (0,0) is empty
        assert!((values[0] - (-1.0 / 9.0 - 0.5)).abs() < 1e-6);
        // (2,0) holds external 5, internal 4
        assert!((values[18] - (4.0 / 9.0 - 0.5)).abs() < 1e-6);
        for &value in values {
            assert!((-0.62..0.5).contains(&value));
        }
    }

    #[test]
    fn test_mask_tensor_matches_mask() {
        let device = NdArrayDevice::default();
        let env = Sudoku::default();
        let (_, obs) = env.reset(0);

        let tensor = sudoku_mask_tensor::<TestBackend>(&obs.action_mask, &device);
        assert_eq!(tensor.dims(), [NUM_ACTIONS]);

        let data = tensor.to_data();
        let legal = data.as_slice::<bool>().unwrap();
        assert_eq!(legal.iter().filter(|&&l| l).count(), obs.action_mask.count());

        let action = SudokuAction::new(0, 0, 1);
        assert!(legal[action.index().unwrap()]);
        let action = SudokuAction::new(0, 0, 0);
        assert!(!legal[action.index().unwrap()]);
    }

    #[test]
    fn test_sudoku_batch_shapes() {
        let device = NdArrayDevice::default();
        let env = Sudoku::default();
        let observations: Vec<_> = (0..3).map(|seed| env.reset(seed).1).collect();

        let (boards, masks) = sudoku_batch::<TestBackend>(&observations, &device);
        assert_eq!(boards.dims(), [3, 1, 9, 9]);
        assert_eq!(masks.dims(), [3, NUM_ACTIONS]);
    }

    #[test]
    fn test_graph_features_layout() {
        // 0 - 1, node 2 isolated, 2 colors
        let graph = AdjacencyMatrix::from_edges(3, &[(0, 1)]).unwrap();
        let env = GraphColoring::new(
            FixedGraphGenerator::new(graph, 2).unwrap(),
            crate::game::graph_coloring::ColorCountReward,
        );
        let (state, _) = env.reset(0);
        let obs = env.step(&state, 1).observation;

        let features = graph_features(&obs);
        assert_eq!(features.len(), graph_feature_dim(3, 2));
        assert_eq!(
            features,
            vec![
                // adjacency
                0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0,
                // colors: node 0 has color 1, others uncolored
                0.0, 1.0, 0.0, 0.0, 0.0, 0.0,
                // current node
                0.0, 1.0, 0.0,
            ]
        );
    }

    #[test]
    fn test_graph_batch_shapes() {
        let device = NdArrayDevice::default();
        let env = GraphColoring::new(
            FixedGraphGenerator::petersen(),
            crate::game::graph_coloring::ColorCountReward,
        );
        let (_, obs) = env.reset(0);
        let observations = vec![obs.clone(), obs];

        let (features, masks) = graph_batch::<TestBackend>(&observations, &device);
        assert_eq!(features.dims(), [2, graph_feature_dim(10, 10)]);
        assert_eq!(masks.dims(), [2, 10]);
    }

    #[test]
    fn test_uncolored_nodes_have_empty_one_hot() {
        let graph = Arc::new(AdjacencyMatrix::with_nodes(2).unwrap());
        let obs = GraphColoringObservation {
            adj_matrix: graph,
            colors: vec![UNCOLORED, UNCOLORED],
            action_mask: vec![true, true],
            current_node_index: 0,
        };
        let features = graph_features(&obs);
        assert_eq!(&features[4..8], &[0.0; 4]);
        assert_eq!(&features[8..], &[1.0, 0.0]);
    }
}
