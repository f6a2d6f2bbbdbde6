//! Reinforcement learning side of the puzzles
//!
//! Provides:
//! - Tensor observations for both environments
//! - Actor-critic networks (Sudoku CNNs, graph coloring MLP)
//! - Random and network-driven agents
//! - Model persistence

pub mod agent;
pub mod backend;
pub mod network;
pub mod observation;
pub mod persistence;

pub use agent::{Agent, GraphColoringNetworkAgent, RandomAgent, Selection, SudokuNetworkAgent};
pub use backend::{default_device, InferenceBackend};
pub use network::{
    GraphColoringActorCritic, GraphColoringActorCriticConfig, SudokuActorCritic,
    SudokuActorCriticConfig,
};
pub use observation::{graph_batch, graph_feature_dim, graph_features, sudoku_batch};
pub use persistence::{
    load_graph_network, load_metadata, load_sudoku_network, save_graph_network,
    save_sudoku_network, ModelMetadata, NetworkSpec,
};
