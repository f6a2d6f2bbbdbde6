//! Actor-critic networks for the puzzle environments
//!
//! # Sudoku
//!
//! Policy and value use separate CNNs with the same layout:
//!
//! ```text
//! Input: [batch, 1, 9, 9]   (cell / 9 - 0.5)
//!   ↓ Pad right/bottom by 1, Conv2d(1→C, k=2, s=2) + ReLU   → [batch, C, 5, 5]
//!   ↓ Pad right/bottom by 1, Conv2d(C→C, k=2, s=1) + ReLU   → [batch, C, 5, 5]
//!   ↓ Flatten: [batch, 25*C]
//!   ↓ MLP(hidden layers, ReLU between)
//!   ↓ Linear → 729 logits (policy) or 1 value
//! ```
//!
//! The padding reproduces SAME convolutions, which burn only supports for odd
//! kernels, so every cell reaches the heads. Policy logits of illegal actions
//! are replaced by `f32::MIN`.
//!
//! # Graph coloring
//!
//! A shared MLP trunk over the flat feature vector, split into an actor head
//! (one logit per color, masked the same way) and a critic head.
//!
//! # Example
//!
//! ```rust
//! use ml_puzzles::rl::SudokuActorCriticConfig;
//! use burn::backend::ndarray::NdArrayDevice;
//! use burn::backend::NdArray;
//! use burn::tensor::{Bool, Tensor, TensorData};
//!
//! type Backend = NdArray<f32>;
//!
//! let device = NdArrayDevice::default();
//! let network = SudokuActorCriticConfig::default().init::<Backend>(&device);
//!
//! let boards = Tensor::zeros([4, 1, 9, 9], &device);
//! let mask = Tensor::<Backend, 2, Bool>::from_data(
//!     TensorData::new(vec![true; 4 * 729], [4, 729]),
//!     &device,
//! );
//! let (logits, value) = network.forward(boards, mask);
//!
//! assert_eq!(logits.dims(), [4, 729]);
//! assert_eq!(value.dims(), [4]);
//! ```

use burn::{
    module::Module,
    nn::{
        conv::{Conv2d, Conv2dConfig},
        Linear, LinearConfig, PaddingConfig2d,
    },
    tensor::{activation::relu, backend::Backend, Bool, Tensor},
};
use serde::{Deserialize, Serialize};

use crate::game::sudoku::{BOARD_WIDTH, NUM_ACTIONS};
use crate::rl::observation::graph_feature_dim;

/// Spatial size after both SAME-padded convolutions: 9 → 5 → 5
const CONV_OUTPUT_WIDTH: usize = BOARD_WIDTH.div_ceil(2);

/// Zero padding (left, right, top, bottom) applied before each convolution
const SAME_PADDING: (usize, usize, usize, usize) = (0, 1, 0, 1);

/// Configuration for the Sudoku actor-critic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SudokuActorCriticConfig {
    /// Channels of both convolutional layers
    pub num_channels: usize,
    /// Hidden layer widths of the policy MLP
    pub policy_layers: Vec<usize>,
    /// Hidden layer widths of the value MLP
    pub value_layers: Vec<usize>,
}

impl Default for SudokuActorCriticConfig {
    fn default() -> Self {
        Self {
            num_channels: 64,
            policy_layers: vec![64, 64],
            value_layers: vec![128, 128],
        }
    }
}

impl SudokuActorCriticConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.num_channels == 0 {
            return Err("num_channels must be at least 1".to_string());
        }
        if self.policy_layers.iter().chain(&self.value_layers).any(|&w| w == 0) {
            return Err("MLP layer widths must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> SudokuActorCritic<B> {
        SudokuActorCritic {
            policy: SudokuCnn::new(self.num_channels, &self.policy_layers, NUM_ACTIONS, device),
            value: SudokuCnn::new(self.num_channels, &self.value_layers, 1, device),
        }
    }
}

/// Convolutional torso followed by an MLP
#[derive(Module, Debug)]
pub struct SudokuCnn<B: Backend> {
    conv1: Conv2d<B>,
    conv2: Conv2d<B>,
    hidden: Vec<Linear<B>>,
    output: Linear<B>,
}

impl<B: Backend> SudokuCnn<B> {
    fn new(num_channels: usize, layers: &[usize], num_outputs: usize, device: &B::Device) -> Self {
        let flattened_dim = num_channels * CONV_OUTPUT_WIDTH * CONV_OUTPUT_WIDTH;
        let (hidden, last_dim) = mlp_layers(flattened_dim, layers, device);

        Self {
            conv1: Conv2dConfig::new([1, num_channels], [2, 2])
                .with_stride([2, 2])
                .with_padding(PaddingConfig2d::Valid)
                .init(device),
            conv2: Conv2dConfig::new([num_channels, num_channels], [2, 2])
                .with_padding(PaddingConfig2d::Valid)
                .init(device),
            hidden,
            output: LinearConfig::new(last_dim, num_outputs).init(device),
        }
    }

    /// [batch, 1, 9, 9] → [batch, num_outputs]
    pub fn forward(&self, board: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = relu(self.conv1.forward(board.pad(SAME_PADDING, 0.0)));
        let x = relu(self.conv2.forward(x.pad(SAME_PADDING, 0.0)));

        let [batch_size, channels, height, width] = x.dims();
        let x = x.reshape([batch_size, channels * height * width]);

        let x = self
            .hidden
            .iter()
            .fold(x, |x, layer| relu(layer.forward(x)));
        self.output.forward(x)
    }
}

/// Separate policy and value CNNs over the Sudoku board
#[derive(Module, Debug)]
pub struct SudokuActorCritic<B: Backend> {
    policy: SudokuCnn<B>,
    value: SudokuCnn<B>,
}

impl<B: Backend> SudokuActorCritic<B> {
    /// Masked policy logits [batch, 729] and values [batch]
    pub fn forward(
        &self,
        board: Tensor<B, 4>,
        action_mask: Tensor<B, 2, Bool>,
    ) -> (Tensor<B, 2>, Tensor<B, 1>) {
        let logits = self.policy_logits(board.clone(), action_mask);
        let value = self.value(board);
        (logits, value)
    }

    pub fn policy_logits(
        &self,
        board: Tensor<B, 4>,
        action_mask: Tensor<B, 2, Bool>,
    ) -> Tensor<B, 2> {
        mask_logits(self.policy.forward(board), action_mask)
    }

    pub fn value(&self, board: Tensor<B, 4>) -> Tensor<B, 1> {
        let value = self.value.forward(board);
        let [batch_size, _] = value.dims();
        value.reshape([batch_size])
    }
}

/// Configuration for the graph coloring actor-critic
///
/// `num_nodes` and `num_colors` fix the input and output sizes, so a network
/// only fits graphs of one size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphColoringActorCriticConfig {
    pub num_nodes: usize,
    pub num_colors: usize,
    /// Widths of the shared trunk layers
    pub hidden_layers: Vec<usize>,
}

impl GraphColoringActorCriticConfig {
    pub fn new(num_nodes: usize, num_colors: usize) -> Self {
        Self {
            num_nodes,
            num_colors,
            hidden_layers: vec![256, 256],
        }
    }

    pub fn with_hidden_layers(mut self, hidden_layers: Vec<usize>) -> Self {
        self.hidden_layers = hidden_layers;
        self
    }

    pub fn input_dim(&self) -> usize {
        graph_feature_dim(self.num_nodes, self.num_colors)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.num_nodes == 0 || self.num_colors == 0 {
            return Err(format!(
                "graph network needs at least one node and one color, got {} nodes and {} colors",
                self.num_nodes, self.num_colors
            ));
        }
        if self.hidden_layers.contains(&0) {
            return Err("hidden layer widths must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> GraphColoringActorCritic<B> {
        let (trunk, last_dim) = mlp_layers(self.input_dim(), &self.hidden_layers, device);
        GraphColoringActorCritic {
            trunk,
            actor_head: LinearConfig::new(last_dim, self.num_colors).init(device),
            critic_head: LinearConfig::new(last_dim, 1).init(device),
        }
    }
}

/// Shared MLP trunk with actor and critic heads
#[derive(Module, Debug)]
pub struct GraphColoringActorCritic<B: Backend> {
    trunk: Vec<Linear<B>>,
    actor_head: Linear<B>,
    critic_head: Linear<B>,
}

impl<B: Backend> GraphColoringActorCritic<B> {
    /// Masked color logits [batch, K] and values [batch]
    pub fn forward(
        &self,
        features: Tensor<B, 2>,
        action_mask: Tensor<B, 2, Bool>,
    ) -> (Tensor<B, 2>, Tensor<B, 1>) {
        let x = self
            .trunk
            .iter()
            .fold(features, |x, layer| relu(layer.forward(x)));

        let logits = mask_logits(self.actor_head.forward(x.clone()), action_mask);

        let value = self.critic_head.forward(x);
        let [batch_size, _] = value.dims();

        (logits, value.reshape([batch_size]))
    }
}

/// Replace logits of illegal actions with the lowest finite f32
fn mask_logits<B: Backend>(logits: Tensor<B, 2>, action_mask: Tensor<B, 2, Bool>) -> Tensor<B, 2> {
    logits.mask_fill(action_mask.bool_not(), f32::MIN)
}

fn mlp_layers<B: Backend>(
    input_dim: usize,
    widths: &[usize],
    device: &B::Device,
) -> (Vec<Linear<B>>, usize) {
    let mut layers = Vec::with_capacity(widths.len());
    let mut last_dim = input_dim;
    for &width in widths {
        layers.push(LinearConfig::new(last_dim, width).init(device));
        last_dim = width;
    }
    (layers, last_dim)
}
