use super::action::SudokuAction;
use super::rules::is_puzzle_solved;
use super::state::SudokuState;
use crate::game::RewardFn;

/// Sparse reward: 1.0 once the board is solved, 0.0 otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct SparseReward;

impl RewardFn<SudokuState, SudokuAction> for SparseReward {
    fn reward(
        &self,
        _state: &SudokuState,
        _action: &SudokuAction,
        next_state: &SudokuState,
        _done: bool,
    ) -> f32 {
        if is_puzzle_solved(next_state.board()) {
            1.0
        } else {
            0.0
        }
    }
}
