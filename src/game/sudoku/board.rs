use crate::error::{PuzzleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows, columns and digits
pub const BOARD_WIDTH: usize = 9;
/// Width of a 3x3 block
pub const BOX_WIDTH: usize = 3;
/// Number of cells on the board
pub const NUM_CELLS: usize = BOARD_WIDTH * BOARD_WIDTH;
/// Number of (row, col, digit) actions
pub const NUM_ACTIONS: usize = NUM_CELLS * BOARD_WIDTH;
/// Internal value of an empty cell; digits are stored as 0-8
pub const EMPTY_CELL: i8 = -1;

/// Index of the block containing (row, col), numbered 0-8 in reading order
pub fn box_index(row: usize, col: usize) -> usize {
    (row / BOX_WIDTH) * BOX_WIDTH + col / BOX_WIDTH
}

/// A 9x9 Sudoku board in the internal encoding
///
/// Cells hold [`EMPTY_CELL`] or a digit in 0-8. The external 0-empty / 1-9
/// convention is only used by [`Board::from_external`], [`Board::parse`],
/// [`Board::to_external`] and `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "[[i8; BOARD_WIDTH]; BOARD_WIDTH]",
    into = "[[i8; BOARD_WIDTH]; BOARD_WIDTH]"
)]
pub struct Board {
    cells: [[i8; BOARD_WIDTH]; BOARD_WIDTH],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board with every cell empty
    pub fn empty() -> Self {
        Self {
            cells: [[EMPTY_CELL; BOARD_WIDTH]; BOARD_WIDTH],
        }
    }

    /// Build a board from internal values (-1 or 0-8)
    pub fn from_cells(cells: [[i8; BOARD_WIDTH]; BOARD_WIDTH]) -> Result<Self> {
        for (row, values) in cells.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if !(EMPTY_CELL..BOARD_WIDTH as i8).contains(&value) {
                    return Err(PuzzleError::InvalidBoard(format!(
                        "cell ({row}, {col}) holds {value}, expected -1..=8"
                    )));
                }
            }
        }
        Ok(Self { cells })
    }

    /// Built-in grids in the external encoding, converted at compile time
    ///
    /// An out-of-range value fails const evaluation.
    pub(crate) const fn from_external_const(grid: [[u8; BOARD_WIDTH]; BOARD_WIDTH]) -> Self {
        let mut cells = [[EMPTY_CELL; BOARD_WIDTH]; BOARD_WIDTH];
        let mut row = 0;
        while row < BOARD_WIDTH {
            let mut col = 0;
            while col < BOARD_WIDTH {
                let value = grid[row][col];
                assert!(value as usize <= BOARD_WIDTH, "built-in grid value out of range");
                cells[row][col] = value as i8 - 1;
                col += 1;
            }
            row += 1;
        }
        Self { cells }
    }

    /// Build a board from the external encoding (0 = empty, 1-9 = digit)
    pub fn from_external(grid: [[u8; BOARD_WIDTH]; BOARD_WIDTH]) -> Result<Self> {
        let mut cells = [[EMPTY_CELL; BOARD_WIDTH]; BOARD_WIDTH];
        for (row, values) in grid.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if value as usize > BOARD_WIDTH {
                    return Err(PuzzleError::InvalidBoard(format!(
                        "cell ({row}, {col}) holds {value}, expected 0..=9"
                    )));
                }
                cells[row][col] = value as i8 - 1;
            }
        }
        Ok(Self { cells })
    }

    /// Parse an 81-character puzzle string in reading order
    ///
    /// `0` and `.` mark empty cells, `1`-`9` are digits. Whitespace is ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut cells = [[EMPTY_CELL; BOARD_WIDTH]; BOARD_WIDTH];
        let mut count = 0;

        for ch in text.chars().filter(|c| !c.is_whitespace()) {
            if count == NUM_CELLS {
                count += 1;
                break;
            }
            let value = match ch {
                '0' | '.' => EMPTY_CELL,
                '1'..='9' => (ch as u8 - b'1') as i8,
                other => {
                    return Err(PuzzleError::InvalidBoard(format!(
                        "unexpected character {other:?}"
                    )))
                }
            };
            cells[count / BOARD_WIDTH][count % BOARD_WIDTH] = value;
            count += 1;
        }

        if count != NUM_CELLS {
            let found = if count > NUM_CELLS {
                "more".to_string()
            } else {
                count.to_string()
            };
            return Err(PuzzleError::InvalidBoard(format!(
                "expected {NUM_CELLS} cells, got {found}"
            )));
        }

        Ok(Self { cells })
    }

    /// Convert back to the external encoding
    pub fn to_external(&self) -> [[u8; BOARD_WIDTH]; BOARD_WIDTH] {
        let mut grid = [[0u8; BOARD_WIDTH]; BOARD_WIDTH];
        for (row, values) in self.cells.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                grid[row][col] = (value + 1) as u8;
            }
        }
        grid
    }

    /// Raw internal values
    pub fn cells(&self) -> &[[i8; BOARD_WIDTH]; BOARD_WIDTH] {
        &self.cells
    }

    /// Internal value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> i8 {
        self.cells[row][col]
    }

    /// Digit (0-8) at (row, col), or None for an empty cell
    pub fn digit(&self, row: usize, col: usize) -> Option<usize> {
        let value = self.cells[row][col];
        (value != EMPTY_CELL).then_some(value as usize)
    }

    pub fn is_empty_cell(&self, row: usize, col: usize) -> bool {
        self.cells[row][col] == EMPTY_CELL
    }

    /// Copy of this board with `digit` written at (row, col)
    pub fn with_digit(&self, row: usize, col: usize, digit: usize) -> Self {
        let mut next = *self;
        next.cells[row][col] = digit as i8;
        next
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&value| value != EMPTY_CELL)
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.filled_count() == NUM_CELLS
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_WIDTH {
            if row > 0 && row % BOX_WIDTH == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for col in 0..BOARD_WIDTH {
                if col > 0 && col % BOX_WIDTH == 0 {
                    write!(f, "| ")?;
                }
                match self.digit(row, col) {
                    Some(digit) => write!(f, "{}", digit + 1)?,
                    None => write!(f, ".")?,
                }
                if col + 1 < BOARD_WIDTH {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl TryFrom<[[i8; BOARD_WIDTH]; BOARD_WIDTH]> for Board {
    type Error = PuzzleError;

    fn try_from(cells: [[i8; BOARD_WIDTH]; BOARD_WIDTH]) -> Result<Self> {
        Self::from_cells(cells)
    }
}

impl From<Board> for [[i8; BOARD_WIDTH]; BOARD_WIDTH] {
    fn from(board: Board) -> Self {
        board.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str =
        "000801000000000043500000000000070800000000100020030000600000075003400000000200600";

    #[test]
    fn test_box_index() {
        assert_eq!(box_index(0, 0), 0);
        assert_eq!(box_index(2, 2), 0);
        assert_eq!(box_index(0, 3), 1);
        assert_eq!(box_index(4, 4), 4);
        assert_eq!(box_index(8, 0), 6);
        assert_eq!(box_index(8, 8), 8);
    }

    #[test]
    fn test_parse_shifts_digits() {
        let board = Board::parse(PUZZLE).unwrap();
        assert_eq!(board.get(0, 3), 7); // external 8
        assert_eq!(board.get(2, 0), 4); // external 5
        assert_eq!(board.get(0, 0), EMPTY_CELL);
        assert_eq!(board.digit(5, 1), Some(1));
        assert_eq!(board.filled_count(), 17);
    }

    #[test]
    fn test_parse_accepts_dots_and_whitespace() {
        let dotted = PUZZLE.replace('0', ".");
        let spaced: String = dotted
            .as_bytes()
            .chunks(9)
            .map(|chunk| format!("{}\n", std::str::from_utf8(chunk).unwrap()))
            .collect();
        assert_eq!(
            Board::parse(&spaced).unwrap(),
            Board::parse(PUZZLE).unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Board::parse(&PUZZLE[..80]).is_err());
        assert!(Board::parse(&format!("{PUZZLE}1")).is_err());
        assert!(Board::parse(&PUZZLE.replacen('0', "x", 1)).is_err());
    }

    #[test]
    fn test_external_conversion() {
        let board = Board::parse(PUZZLE).unwrap();
        let external = board.to_external();
        assert_eq!(external[2][0], 5);
        assert_eq!(external[0][0], 0);
        assert_eq!(Board::from_external(external).unwrap(), board);

        let mut bad = external;
        bad[4][4] = 10;
        assert!(Board::from_external(bad).is_err());
    }

    #[test]
    fn test_from_cells_validates_range() {
        let mut cells = [[EMPTY_CELL; BOARD_WIDTH]; BOARD_WIDTH];
        cells[0][0] = 8;
        assert!(Board::from_cells(cells).is_ok());
        cells[0][0] = 9;
        assert!(Board::from_cells(cells).is_err());
        cells[0][0] = -2;
        assert!(Board::from_cells(cells).is_err());
    }

    #[test]
    fn test_deserialize_validates_range() {
        let board = Board::parse(PUZZLE).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.starts_with("[[-1,-1,-1,7,"));
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);

        let mut cells = [[EMPTY_CELL; BOARD_WIDTH]; BOARD_WIDTH];
        cells[0][0] = 42;
        let json = serde_json::to_string(&cells).unwrap();
        let err = serde_json::from_str::<Board>(&json).unwrap_err();
        assert!(err.to_string().contains("cell (0, 0) holds 42"));
    }

    #[test]
    fn test_const_conversion_matches_from_external() {
        let mut grid = [[0u8; BOARD_WIDTH]; BOARD_WIDTH];
        grid[0][0] = 9;
        grid[4][7] = 1;
        const EMPTY: Board = Board::from_external_const([[0; BOARD_WIDTH]; BOARD_WIDTH]);
        assert_eq!(EMPTY, Board::empty());
        assert_eq!(
            Board::from_external_const(grid),
            Board::from_external(grid).unwrap()
        );
    }

    #[test]
    fn test_with_digit_leaves_original() {
        let board = Board::empty();
        let next = board.with_digit(3, 4, 6);
        assert!(board.is_empty_cell(3, 4));
        assert_eq!(next.digit(3, 4), Some(6));
        assert_eq!(next.filled_count(), 1);
        assert!(!next.is_full());
    }

    #[test]
    fn test_display() {
        let board = Board::parse(PUZZLE).unwrap();
        let text = board.to_string();
        let first_line = text.lines().next().unwrap();
        assert_eq!(first_line, ". . . | 8 . 1 | . . .");
        assert_eq!(text.lines().count(), 11);
    }
}
