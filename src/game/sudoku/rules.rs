//! Sudoku placement rules: action masking and solved-board detection
//!
//! Both checks work from per-unit digit membership tables (rows, columns,
//! blocks) built in a single pass over the board, so a whole board is handled
//! at once and batches are just the same computation mapped over boards.

use super::action::SudokuAction;
use super::board::{box_index, Board, BOARD_WIDTH};

/// Digits present in each row, column and block
struct UnitDigits {
    rows: [[bool; BOARD_WIDTH]; BOARD_WIDTH],
    cols: [[bool; BOARD_WIDTH]; BOARD_WIDTH],
    boxes: [[bool; BOARD_WIDTH]; BOARD_WIDTH],
}

impl UnitDigits {
    fn of(board: &Board) -> Self {
        let mut units = Self {
            rows: [[false; BOARD_WIDTH]; BOARD_WIDTH],
            cols: [[false; BOARD_WIDTH]; BOARD_WIDTH],
            boxes: [[false; BOARD_WIDTH]; BOARD_WIDTH],
        };
        for row in 0..BOARD_WIDTH {
            for col in 0..BOARD_WIDTH {
                if let Some(digit) = board.digit(row, col) {
                    units.rows[row][digit] = true;
                    units.cols[col][digit] = true;
                    units.boxes[box_index(row, col)][digit] = true;
                }
            }
        }
        units
    }

    fn conflicts(&self, row: usize, col: usize, digit: usize) -> bool {
        self.rows[row][digit] || self.cols[col][digit] || self.boxes[box_index(row, col)][digit]
    }
}

/// Legal placements for every (row, col, digit)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SudokuActionMask {
    legal: [[[bool; BOARD_WIDTH]; BOARD_WIDTH]; BOARD_WIDTH],
}

impl SudokuActionMask {
    /// A mask with no legal action
    pub fn none() -> Self {
        Self {
            legal: [[[false; BOARD_WIDTH]; BOARD_WIDTH]; BOARD_WIDTH],
        }
    }

    /// Whether `action` is allowed; out-of-range actions never are
    pub fn is_legal(&self, action: SudokuAction) -> bool {
        action.is_in_range() && self.legal[action.row][action.col][action.digit]
    }

    /// Per-digit legality of one cell
    pub fn cell(&self, row: usize, col: usize) -> &[bool; BOARD_WIDTH] {
        &self.legal[row][col]
    }

    pub fn any(&self) -> bool {
        self.legal.iter().flatten().flatten().any(|&legal| legal)
    }

    /// Number of legal actions
    pub fn count(&self) -> usize {
        self.legal
            .iter()
            .flatten()
            .flatten()
            .filter(|&&legal| legal)
            .count()
    }

    /// Legal actions in flat-index order
    pub fn legal_actions(&self) -> Vec<SudokuAction> {
        let mut actions = Vec::new();
        for row in 0..BOARD_WIDTH {
            for col in 0..BOARD_WIDTH {
                for digit in 0..BOARD_WIDTH {
                    if self.legal[row][col][digit] {
                        actions.push(SudokuAction::new(row, col, digit));
                    }
                }
            }
        }
        actions
    }

    /// Flattened mask of length 729, indexed like [`SudokuAction::index`]
    pub fn to_flat(&self) -> Vec<bool> {
        self.legal.iter().flatten().flatten().copied().collect()
    }
}

/// Compute the action mask of a board
///
/// An empty cell accepts a digit iff the digit is absent from the cell's row,
/// column and block. Filled cells, clues included, accept nothing.
pub fn get_action_mask(board: &Board) -> SudokuActionMask {
    let units = UnitDigits::of(board);
    let mut mask = SudokuActionMask::none();

    for row in 0..BOARD_WIDTH {
        for col in 0..BOARD_WIDTH {
            if !board.is_empty_cell(row, col) {
                continue;
            }
            for digit in 0..BOARD_WIDTH {
                mask.legal[row][col][digit] = !units.conflicts(row, col, digit);
            }
        }
    }

    mask
}

/// Action masks for a batch of boards
pub fn action_mask_batch(boards: &[Board]) -> Vec<SudokuActionMask> {
    boards.iter().map(get_action_mask).collect()
}

/// Returns true iff every row, column and block holds each digit exactly once
///
/// Boards with empty cells or duplicates are simply not solved.
pub fn is_puzzle_solved(board: &Board) -> bool {
    if !board.is_full() {
        return false;
    }

    let mut rows = [0u16; BOARD_WIDTH];
    let mut cols = [0u16; BOARD_WIDTH];
    let mut boxes = [0u16; BOARD_WIDTH];

    for row in 0..BOARD_WIDTH {
        for col in 0..BOARD_WIDTH {
            let Some(digit) = board.digit(row, col) else {
                return false;
            };
            let bit = 1u16 << digit;
            let block = box_index(row, col);
            if rows[row] & bit != 0 || cols[col] & bit != 0 || boxes[block] & bit != 0 {
                return false;
            }
            rows[row] |= bit;
            cols[col] |= bit;
            boxes[block] |= bit;
        }
    }

    // Nine distinct digits per unit means every unit is a permutation
    true
}

/// Solved verdicts for a batch of boards
pub fn solved_batch(boards: &[Board]) -> Vec<bool> {
    boards.iter().map(is_puzzle_solved).collect()
}
