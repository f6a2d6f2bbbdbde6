//! Initial-state generators for Sudoku episodes

use super::board::{Board, BOARD_WIDTH};
use super::rules::{get_action_mask, SudokuActionMask};
use super::state::SudokuState;
use crate::error::{PuzzleError, Result};
use crate::game::Generator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use tracing::{debug, info};

const DUMMY_PUZZLE: [[u8; BOARD_WIDTH]; BOARD_WIDTH] = [
    [0, 0, 0, 8, 0, 1, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 4, 3],
    [5, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 7, 0, 8, 0, 0],
    [0, 0, 0, 0, 0, 0, 1, 0, 0],
    [0, 2, 0, 0, 3, 0, 0, 0, 0],
    [6, 0, 0, 0, 0, 0, 0, 7, 5],
    [0, 0, 3, 4, 0, 0, 0, 0, 0],
    [0, 0, 0, 2, 0, 0, 6, 0, 0],
];

const DUMMY_SOLUTION: [[u8; BOARD_WIDTH]; BOARD_WIDTH] = [
    [2, 3, 7, 8, 4, 1, 5, 6, 9],
    [1, 8, 6, 7, 9, 5, 2, 4, 3],
    [5, 9, 4, 3, 2, 6, 7, 1, 8],
    [3, 1, 5, 6, 7, 4, 8, 9, 2],
    [4, 6, 9, 5, 8, 2, 1, 3, 7],
    [7, 2, 8, 1, 3, 9, 4, 5, 6],
    [6, 4, 2, 9, 1, 8, 3, 7, 5],
    [8, 5, 3, 4, 6, 7, 9, 2, 1],
    [9, 7, 1, 2, 5, 3, 6, 8, 4],
];

const DUMMY_BOARD: Board = Board::from_external_const(DUMMY_PUZZLE);
const DUMMY_SOLUTION_BOARD: Board = Board::from_external_const(DUMMY_SOLUTION);

/// Always generates the same 17-clue board, for debugging
#[derive(Debug, Clone)]
pub struct DummyGenerator {
    board: Board,
    solution: Board,
    action_mask: SudokuActionMask,
}

impl DummyGenerator {
    pub fn new() -> Self {
        Self {
            board: DUMMY_BOARD,
            solution: DUMMY_SOLUTION_BOARD,
            action_mask: get_action_mask(&DUMMY_BOARD),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The unique solution of the dummy board
    pub fn solution(&self) -> &Board {
        &self.solution
    }
}

impl Default for DummyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for DummyGenerator {
    type State = SudokuState;

    fn generate(&self, _seed: u64) -> SudokuState {
        SudokuState::from_puzzle_with_mask(self.board, self.action_mask.clone())
    }
}

/// Samples a board uniformly from a puzzle database
#[derive(Debug, Clone)]
pub struct DatabaseGenerator {
    boards: Vec<Board>,
}

impl DatabaseGenerator {
    /// Create a generator from boards in the external encoding
    /// (0 = empty, 1-9 = digit)
    pub fn new(database: &[[[u8; BOARD_WIDTH]; BOARD_WIDTH]]) -> Result<Self> {
        let boards = database
            .iter()
            .map(|grid| Board::from_external(*grid))
            .collect::<Result<Vec<_>>>()?;
        Self::from_boards(boards)
    }

    /// Create a generator from already converted boards
    pub fn from_boards(boards: Vec<Board>) -> Result<Self> {
        if boards.is_empty() {
            return Err(PuzzleError::EmptyDatabase);
        }
        Ok(Self { boards })
    }

    /// Load a database file with one 81-character puzzle per line
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| PuzzleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let boards = parse_database(&text)?;
        info!(path = %path.display(), boards = boards.len(), "loaded sudoku database");
        Self::from_boards(boards)
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Database index drawn for `seed`
    pub fn sample_index(&self, seed: u64) -> usize {
        let mut rng = StdRng::seed_from_u64(seed);
        rng.gen_range(0..self.boards.len())
    }
}

impl Generator for DatabaseGenerator {
    type State = SudokuState;

    fn generate(&self, seed: u64) -> SudokuState {
        let idx = self.sample_index(seed);
        debug!(seed, idx, "sampled sudoku board");
        SudokuState::from_puzzle(self.boards[idx])
    }
}

/// Parse the text of a database file into boards
pub fn parse_database(text: &str) -> Result<Vec<Board>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| {
            Board::parse(line).map_err(|err| PuzzleError::InvalidDatabaseLine {
                line: idx + 1,
                reason: err.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::sudoku::rules::is_puzzle_solved;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SOLUTION: &str =
        "237841569186795243594326718315674892469582137728139456642918375853467921971253684";

    #[test]
    fn test_dummy_generator_ignores_seed() {
        let generator = DummyGenerator::new();
        let a = generator.generate(0);
        let b = generator.generate(12345);
        assert_eq!(a, b);
        assert_eq!(a.clue_count(), 17);
    }

    #[test]
    fn test_dummy_clue_rows_are_masked() {
        let state = DummyGenerator::new().generate(0);
        // External 5 at (2, 0) is stored as 4
        assert_eq!(state.board().get(2, 0), 4);
        assert!(state.action_mask().cell(2, 0).iter().all(|&legal| !legal));
        // External 2 at (5, 1)
        assert_eq!(state.board().get(5, 1), 1);
        assert!(state.action_mask().cell(5, 1).iter().all(|&legal| !legal));
        // An empty cell in row 5 still has candidates
        assert!(state.board().is_empty_cell(5, 0));
        assert!(state.action_mask().cell(5, 0).iter().any(|&legal| legal));
    }

    #[test]
    fn test_dummy_solution_is_consistent() {
        let generator = DummyGenerator::new();
        assert_eq!(*generator.board(), Board::from_external(DUMMY_PUZZLE).unwrap());
        assert_eq!(generator.board().filled_count(), 17);
        assert!(is_puzzle_solved(generator.solution()));
        for row in 0..BOARD_WIDTH {
            for col in 0..BOARD_WIDTH {
                if let Some(digit) = generator.board().digit(row, col) {
                    assert_eq!(generator.solution().digit(row, col), Some(digit));
                }
            }
        }
    }

    fn small_database() -> Vec<[[u8; BOARD_WIDTH]; BOARD_WIDTH]> {
        (1..=5u8)
            .map(|digit| {
                let mut grid = [[0u8; BOARD_WIDTH]; BOARD_WIDTH];
                grid[0][0] = digit;
                grid
            })
            .collect()
    }

    #[test]
    fn test_database_generator_is_deterministic() {
        let generator = DatabaseGenerator::new(&small_database()).unwrap();
        for seed in 0..20 {
            assert_eq!(generator.generate(seed), generator.generate(seed));
        }
    }

    #[test]
    fn test_database_generator_shifts_digits() {
        let generator = DatabaseGenerator::new(&small_database()).unwrap();
        let state = generator.generate(7);
        let idx = generator.sample_index(7);
        // Board idx holds external digit idx + 1, stored as idx
        assert_eq!(state.board().get(0, 0), idx as i8);
        assert!(state.board().is_empty_cell(0, 1));
        assert!(state.action_mask().cell(0, 0).iter().all(|&legal| !legal));
        assert_eq!(*state.action_mask(), get_action_mask(state.board()));
    }

    #[test]
    fn test_database_generator_covers_all_indices() {
        let generator = DatabaseGenerator::new(&small_database()).unwrap();
        let mut counts = [0usize; 5];
        for seed in 0..2000 {
            counts[generator.sample_index(seed)] += 1;
        }
        for count in counts {
            // Expected 400 each
            assert!((250..550).contains(&count), "skewed counts: {counts:?}");
        }
    }

    #[test]
    fn test_empty_database_is_rejected() {
        assert!(matches!(
            DatabaseGenerator::new(&[]),
            Err(PuzzleError::EmptyDatabase)
        ));
    }

    #[test]
    fn test_invalid_database_digit_is_rejected() {
        let mut database = small_database();
        database[2][3][3] = 11;
        assert!(DatabaseGenerator::new(&database).is_err());
    }

    #[test]
    fn test_parse_database_skips_comments() {
        let text = format!("# puzzles\n\n{SOLUTION}\n  \n{}\n", SOLUTION.replace('9', "0"));
        let boards = parse_database(&text).unwrap();
        assert_eq!(boards.len(), 2);
        assert!(is_puzzle_solved(&boards[0]));
        assert!(!boards[1].is_full());
    }

    #[test]
    fn test_parse_database_reports_line() {
        let text = format!("{SOLUTION}\n12345\n");
        match parse_database(&text) {
            Err(PuzzleError::InvalidDatabaseLine { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected line error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_database_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{SOLUTION}").unwrap();
        writeln!(file, "{}", SOLUTION.replacen('2', ".", 1)).unwrap();

        let generator = DatabaseGenerator::load(file.path()).unwrap();
        assert_eq!(generator.len(), 2);
        assert!(!generator.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = DatabaseGenerator::load(Path::new("/nonexistent/puzzles.txt"));
        assert!(matches!(result, Err(PuzzleError::Io { .. })));
    }
}
