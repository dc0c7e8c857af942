mod grid;
mod puzzle;
mod search_problem;

pub use grid::{Cell, CellKind, GridBoard, GridExpansion, GridProblem, GRID_EXPANSION_ORDER};
pub use puzzle::{
    translate_moves, Move, PuzzleExpansion, PuzzleProblem, PuzzleState, Tile, DEFAULT_BLANK,
    PUZZLE_EXPANSION_ORDER,
};
pub use search_problem::SearchProblem;
