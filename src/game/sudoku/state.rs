use super::action::SudokuAction;
use super::board::{Board, BOARD_WIDTH};
use super::rules::{get_action_mask, SudokuActionMask};

/// Snapshot of a Sudoku episode
///
/// The action mask is derived from the board whenever a state is built, so
/// it can never drift from the board. Clue cells are the cells filled when
/// the puzzle was generated; no transition changes them.
#[derive(Debug, Clone, PartialEq)]
pub struct SudokuState {
    board: Board,
    action_mask: SudokuActionMask,
    clues: [[bool; BOARD_WIDTH]; BOARD_WIDTH],
    steps: u32,
}

impl SudokuState {
    /// Start an episode from a puzzle; every filled cell becomes a clue
    pub fn from_puzzle(board: Board) -> Self {
        Self::from_puzzle_with_mask(board, get_action_mask(&board))
    }

    /// Start an episode from a puzzle whose mask is already known
    pub(crate) fn from_puzzle_with_mask(board: Board, action_mask: SudokuActionMask) -> Self {
        let mut clues = [[false; BOARD_WIDTH]; BOARD_WIDTH];
        for (row, flags) in clues.iter_mut().enumerate() {
            for (col, clue) in flags.iter_mut().enumerate() {
                *clue = !board.is_empty_cell(row, col);
            }
        }
        Self::with_mask(board, action_mask, clues, 0)
    }

    fn with_mask(
        board: Board,
        action_mask: SudokuActionMask,
        clues: [[bool; BOARD_WIDTH]; BOARD_WIDTH],
        steps: u32,
    ) -> Self {
        Self {
            board,
            action_mask,
            clues,
            steps,
        }
    }

    /// Successor state with `action` applied
    ///
    /// Returns None when the action is not legal, leaving `self` as the
    /// only valid continuation.
    pub fn place(&self, action: SudokuAction) -> Option<Self> {
        if !self.action_mask.is_legal(action) || self.clues[action.row][action.col] {
            return None;
        }
        let board = self.board.with_digit(action.row, action.col, action.digit);
        Some(Self::with_mask(
            board,
            get_action_mask(&board),
            self.clues,
            self.steps + 1,
        ))
    }

    /// Copy of this state with the step counter advanced, board unchanged
    pub(crate) fn advanced(&self) -> Self {
        let mut next = self.clone();
        next.steps += 1;
        next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn action_mask(&self) -> &SudokuActionMask {
        &self.action_mask
    }

    pub fn is_clue(&self, row: usize, col: usize) -> bool {
        self.clues[row][col]
    }

    /// Number of clue cells
    pub fn clue_count(&self) -> usize {
        self.clues.iter().flatten().filter(|&&clue| clue).count()
    }

    /// Number of steps taken in this episode
    pub fn steps(&self) -> u32 {
        self.steps
    }
}
