//! Errors produced while building search problems and while searching.

use crate::search::Cost;
use thiserror::Error;

/// Terminal failure of a single search invocation. None of these are retried
/// by the engine itself, the caller decides whether to report "no solution",
/// relax the limits, or surface a bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchFailure {
    /// The frontier ran empty without reaching the goal, so no path exists
    /// (within the depth limit, if one was set).
    #[error("frontier exhausted after {iterations} iterations without reaching the goal")]
    Exhausted { iterations: usize },
    /// The iteration budget ran out. The problem may still be solvable with a
    /// larger limit.
    #[error("iteration limit of {limit} reached before the goal was found")]
    IterationLimitReached { limit: usize },
    /// The expansion rule broke its contract, e.g. produced an impossible move
    /// or a negative edge cost.
    #[error("invalid expansion: {0}")]
    InvalidExpansion(String),
}

/// Problems rejected when a grid or puzzle instance is built, before any
/// search step is taken.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProblemError {
    #[error("the board has no cells")]
    EmptyBoard,
    #[error("board row {row} has {found} cells, expected {expected}")]
    RaggedBoard {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("cost grid does not match the {rows}x{cols} board")]
    CostShapeMismatch { rows: usize, cols: usize },
    #[error("unknown cell symbol {0:?}")]
    UnknownCellSymbol(char),
    #[error("cell ({row}, {col}) has invalid traversal cost {cost}")]
    InvalidCost { row: usize, col: usize, cost: f64 },
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("cell ({row}, {col}) is occupied by another car")]
    OccupiedCell { row: usize, col: usize },
    #[error("no start cell given and no routed car found on the board")]
    MissingStart,
    #[error("puzzle dimension must be positive")]
    ZeroDimension,
    #[error("puzzle dimension {0} is too large")]
    DimensionTooLarge(usize),
    #[error("puzzle has {found} tiles, expected {expected} for the given dimension")]
    TileCountMismatch { expected: usize, found: usize },
    #[error("puzzle has {0} blank tiles, expected exactly one")]
    BlankCount(usize),
    #[error("start and goal arrangements do not contain the same tiles")]
    TileSetMismatch,
    #[error("heuristic {heuristic} cannot be used for the {domain} domain")]
    UnsupportedHeuristic {
        heuristic: String,
        domain: &'static str,
    },
}

impl ProblemError {
    pub(crate) fn check_cost(row: usize, col: usize, cost: Cost) -> Result<Cost, Self> {
        if cost.0.is_finite() && cost.0 >= 0. {
            Ok(cost)
        } else {
            Err(ProblemError::InvalidCost {
                row,
                col,
                cost: cost.into_inner(),
            })
        }
    }
}
