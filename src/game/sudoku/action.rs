use super::board::{BOARD_WIDTH, NUM_ACTIONS};
use std::fmt;

/// Placement of a digit in a cell
///
/// `digit` uses the internal 0-8 encoding. The flat index used by the policy
/// head is `row * 81 + col * 9 + digit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SudokuAction {
    pub row: usize,
    pub col: usize,
    pub digit: usize,
}

impl SudokuAction {
    pub fn new(row: usize, col: usize, digit: usize) -> Self {
        Self { row, col, digit }
    }

    /// Returns true if row, column and digit are all within 0..9
    pub fn is_in_range(&self) -> bool {
        self.row < BOARD_WIDTH && self.col < BOARD_WIDTH && self.digit < BOARD_WIDTH
    }

    /// Flat action index in 0..729, or None for out-of-range actions
    pub fn index(&self) -> Option<usize> {
        self.is_in_range()
            .then(|| (self.row * BOARD_WIDTH + self.col) * BOARD_WIDTH + self.digit)
    }

    /// Inverse of [`SudokuAction::index`]
    pub fn from_index(idx: usize) -> Option<Self> {
        if idx >= NUM_ACTIONS {
            return None;
        }
        let digit = idx % BOARD_WIDTH;
        let col = (idx / BOARD_WIDTH) % BOARD_WIDTH;
        let row = idx / (BOARD_WIDTH * BOARD_WIDTH);
        Some(Self { row, col, digit })
    }
}

impl fmt::Display for SudokuAction {
    /// Formats with the external 1-9 digit, e.g. `r2c0=5`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}={}", self.row, self.col, self.digit + 1)
    }
}
