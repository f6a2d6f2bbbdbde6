//! Plain-text rendering of puzzle observations

pub mod renderer;

pub use renderer::{render_graph, render_sudoku, GraphView, SudokuView};
