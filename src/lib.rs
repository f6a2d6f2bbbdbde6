//! ML Puzzles - Sudoku and graph coloring as reinforcement learning environments
//!
//! This library provides:
//! - Puzzle rules and environments with action masks (game module)
//! - Tensor observations, actor-critic networks and agents (rl module)
//! - Episode statistics (metrics module)
//! - Evaluation runs (modes module)
//! - Text rendering of observations (render module)

pub mod config;
pub mod error;
pub mod game;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;

pub use config::AppConfig;
pub use error::{PuzzleError, Result};
