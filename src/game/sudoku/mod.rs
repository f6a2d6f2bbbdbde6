//! Sudoku environment
//!
//! Boards are stored with `-1` for empty cells and digits 0-8. The external
//! 0 = empty / 1-9 convention only appears when boards are parsed, loaded from
//! a database or printed.

pub mod action;
pub mod board;
pub mod env;
pub mod generator;
pub mod reward;
pub mod rules;
pub mod state;

pub use action::SudokuAction;
pub use board::{Board, BOARD_WIDTH, EMPTY_CELL, NUM_ACTIONS};
pub use env::{Sudoku, SudokuObservation};
pub use generator::{DatabaseGenerator, DummyGenerator};
pub use reward::SparseReward;
pub use rules::{
    action_mask_batch, get_action_mask, is_puzzle_solved, solved_batch, SudokuActionMask,
};
pub use state::SudokuState;
