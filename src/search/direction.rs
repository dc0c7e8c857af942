use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

/// An orthogonal step on a board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Row and column deltas of one step.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The direction of a single step from `from` to `to`, if the two
    /// positions are orthogonally adjacent.
    pub fn between(from: (usize, usize), to: (usize, usize)) -> Option<Direction> {
        let delta = (
            to.0 as isize - from.0 as isize,
            to.1 as isize - from.1 as isize,
        );
        match delta {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Apply one step to a position on a `rows` x `cols` board, returning
    /// `None` if the step leaves the board.
    pub fn step(
        &self,
        (row, col): (usize, usize),
        rows: usize,
        cols: usize,
    ) -> Option<(usize, usize)> {
        let (dr, dc) = self.offset();
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;
        (row < rows && col < cols).then_some((row, col))
    }
}
