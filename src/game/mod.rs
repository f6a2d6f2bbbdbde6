//! Puzzle environments
//!
//! This module contains the puzzle rules and environments without any I/O or
//! tensor dependencies. Both environments implement [`Environment`] with pure
//! `reset` / `step` transitions over immutable state snapshots.

pub mod config;
pub mod environment;
pub mod graph_coloring;
pub mod sudoku;

// Re-export commonly used types
pub use config::{GraphColoringConfig, GraphGeneratorConfig, SudokuConfig, SudokuGeneratorConfig};
pub use environment::{Environment, Generator, RewardFn, StepInfo, StepResult};
pub use graph_coloring::{GraphColoring, GraphColoringObservation, GraphColoringState};
pub use sudoku::{Sudoku, SudokuAction, SudokuObservation, SudokuState};
