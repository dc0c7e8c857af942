//! Sliding-tile puzzles on a `dim` x `dim` board with a single blank. Tiles
//! stand for cars; sliding a tile into the blank repositions that car.

use crate::search::{
    heuristics::PuzzleHeuristicName, Direction, ExpansionRule, Goal, ProblemError,
    SearchFailure, SearchProblem, SearchState, StateKey, Successor,
};
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::rc::Rc;

/// Symbol of the blank tile unless configured otherwise.
pub const DEFAULT_BLANK: &str = "_";

/// Order in which blank moves are generated.
pub const PUZZLE_EXPANSION_ORDER: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tile {
    Blank,
    Piece(String),
}

impl Tile {
    pub fn parse(symbol: &str, blank: &str) -> Self {
        if symbol == blank {
            Tile::Blank
        } else {
            Tile::Piece(symbol.to_string())
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Tile::Blank)
    }
}

/// Pieces render as their symbol and the blank as [`DEFAULT_BLANK`]. A
/// [`PuzzleState`] renders its own configured blank symbol instead.
impl Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Blank => f.write_str(DEFAULT_BLANK),
            Tile::Piece(symbol) => f.write_str(symbol),
        }
    }
}

impl Serialize for Tile {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A full tile arrangement, stored row-major, together with the symbol the
/// blank is shown as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    dim: usize,
    tiles: Vec<Tile>,
    blank: usize,
    blank_symbol: Rc<str>,
}

impl PuzzleState {
    /// An arrangement whose blank is shown as [`DEFAULT_BLANK`].
    pub fn new(dim: usize, tiles: Vec<Tile>) -> Result<Self, ProblemError> {
        Self::with_blank_symbol(dim, tiles, Rc::from(DEFAULT_BLANK))
    }

    pub fn parse<T: AsRef<str>>(
        dim: usize,
        symbols: &[T],
        blank: &str,
    ) -> Result<Self, ProblemError> {
        let tiles = symbols
            .iter()
            .map(|symbol| Tile::parse(symbol.as_ref(), blank))
            .collect();
        Self::with_blank_symbol(dim, tiles, Rc::from(blank))
    }

    fn with_blank_symbol(
        dim: usize,
        tiles: Vec<Tile>,
        blank_symbol: Rc<str>,
    ) -> Result<Self, ProblemError> {
        if dim == 0 {
            return Err(ProblemError::ZeroDimension);
        }
        let expected = dim
            .checked_mul(dim)
            .ok_or(ProblemError::DimensionTooLarge(dim))?;
        if tiles.len() != expected {
            return Err(ProblemError::TileCountMismatch {
                expected,
                found: tiles.len(),
            });
        }
        let blanks: Vec<usize> = tiles.iter().positions(Tile::is_blank).collect();
        match blanks.as_slice() {
            &[blank] => Ok(Self {
                dim,
                tiles,
                blank,
                blank_symbol,
            }),
            _ => Err(ProblemError::BlankCount(blanks.len())),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The tiles as symbols, with the blank shown as configured.
    pub fn symbols(&self) -> Vec<&str> {
        self.tiles
            .iter()
            .map(|tile| match tile {
                Tile::Blank => &*self.blank_symbol,
                Tile::Piece(symbol) => symbol.as_str(),
            })
            .collect()
    }

    pub fn blank_index(&self) -> usize {
        self.blank
    }

    pub fn blank_position(&self) -> (usize, usize) {
        self.position(self.blank)
    }

    /// Row and column of a linear index.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.dim, index % self.dim)
    }

    /// Directions the blank can move in, in [`PUZZLE_EXPANSION_ORDER`].
    pub fn available_moves(&self) -> Vec<Direction> {
        PUZZLE_EXPANSION_ORDER
            .into_iter()
            .filter(|direction| {
                direction
                    .step(self.blank_position(), self.dim, self.dim)
                    .is_some()
            })
            .collect()
    }

    /// Swap the blank with its neighbour in the given direction.
    pub fn apply(&self, direction: Direction) -> Result<PuzzleState, SearchFailure> {
        let (row, col) = direction
            .step(self.blank_position(), self.dim, self.dim)
            .ok_or_else(|| {
                SearchFailure::InvalidExpansion(format!(
                    "blank at {:?} cannot move {} on a {}x{} board",
                    self.blank_position(),
                    direction,
                    self.dim,
                    self.dim
                ))
            })?;
        let target = row * self.dim + col;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Ok(PuzzleState {
            dim: self.dim,
            tiles,
            blank: target,
            blank_symbol: Rc::clone(&self.blank_symbol),
        })
    }

    fn has_duplicate_pieces(&self) -> bool {
        !self.tiles.iter().all_unique()
    }
}

impl SearchState for PuzzleState {
    fn key(&self) -> StateKey {
        // Pieces are length-prefixed and the blank is a bare `#`, so no two
        // arrangements share a key whatever their symbols contain.
        StateKey::new(
            self.tiles
                .iter()
                .map(|tile| match tile {
                    Tile::Blank => "#".to_string(),
                    Tile::Piece(symbol) => format!("{}:{}", symbol.len(), symbol),
                })
                .join(","),
        )
    }
}

impl Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.symbols().chunks(self.dim) {
            writeln!(f, "{}", row.iter().join("\t"))?;
        }
        Ok(())
    }
}

/// Blank-slide moves bounded by the board dimension. Every move costs 1.
#[derive(Debug, Clone)]
pub struct PuzzleExpansion {
    dim: usize,
}

impl PuzzleExpansion {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl ExpansionRule<PuzzleState> for PuzzleExpansion {
    fn expand(&self, state: &PuzzleState) -> Result<Vec<Successor<PuzzleState>>, SearchFailure> {
        if state.dim() != self.dim {
            return Err(SearchFailure::InvalidExpansion(format!(
                "state of dimension {} expanded by a rule for dimension {}",
                state.dim(),
                self.dim
            )));
        }
        state
            .available_moves()
            .into_iter()
            .map(|direction| state.apply(direction).map(|next| Successor::new(next, 1.)))
            .collect()
    }
}

/// One tile slide, as shown to a user: which tile moved, from where to where
/// and in which direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    pub tile: Tile,
    pub from: (usize, usize),
    pub to: (usize, usize),
    pub direction: Direction,
}

/// Translate a path of states into the tile moves between them. The tile
/// that moved is found by diffing blank positions; pairs where no tile moved
/// are skipped.
pub fn translate_moves(path: &[PuzzleState]) -> Vec<Move> {
    path.iter()
        .tuple_windows()
        .filter_map(|(before, after)| {
            let from = after.blank_index();
            let to = before.blank_index();
            let tile = &after.tiles()[to];
            if from == to || tile.is_blank() {
                return None;
            }
            let (from, to) = (before.position(from), before.position(to));
            Direction::between(from, to).map(|direction| Move {
                tile: tile.clone(),
                from,
                to,
                direction,
            })
        })
        .collect()
}

/// A puzzle instance: a start arrangement and the goal arrangement.
#[derive(Debug, Clone)]
pub struct PuzzleProblem {
    start: PuzzleState,
    goal: PuzzleState,
}

impl PuzzleProblem {
    pub fn new(start: PuzzleState, goal: PuzzleState) -> Result<Self, ProblemError> {
        if start.dim() != goal.dim() {
            return Err(ProblemError::TileCountMismatch {
                expected: start.tiles().len(),
                found: goal.tiles().len(),
            });
        }
        let sorted = |state: &PuzzleState| state.tiles().iter().sorted().cloned().collect_vec();
        if sorted(&start) != sorted(&goal) {
            return Err(ProblemError::TileSetMismatch);
        }
        Ok(Self { start, goal })
    }

    pub fn start(&self) -> &PuzzleState {
        &self.start
    }

    pub fn goal_state(&self) -> &PuzzleState {
        &self.goal
    }

    /// Whether the goal is reachable from the start. Every slide is a
    /// transposition that moves the blank one step, so the parity of the
    /// start-to-goal permutation must match the parity of the blank's
    /// Manhattan displacement. Repeated pieces can always fix the parity.
    pub fn is_solvable(&self) -> bool {
        if self.start.has_duplicate_pieces() {
            return true;
        }
        let goal_index: HashMap<&Tile, usize> = self
            .goal
            .tiles()
            .iter()
            .enumerate()
            .map(|(index, tile)| (tile, index))
            .collect();
        let permutation: Vec<usize> = self
            .start
            .tiles()
            .iter()
            .map(|tile| goal_index[tile])
            .collect();

        let mut seen = vec![false; permutation.len()];
        let mut cycles = 0;
        for index in 0..permutation.len() {
            if seen[index] {
                continue;
            }
            cycles += 1;
            let mut current = index;
            while !seen[current] {
                seen[current] = true;
                current = permutation[current];
            }
        }
        let permutation_parity = (permutation.len() - cycles) % 2;

        let (start_row, start_col) = self.start.blank_position();
        let (goal_row, goal_col) = self.goal.blank_position();
        let blank_distance = start_row.abs_diff(goal_row) + start_col.abs_diff(goal_col);

        permutation_parity == blank_distance % 2
    }

    pub fn into_search_problem(self, heuristic: PuzzleHeuristicName) -> SearchProblem<PuzzleState> {
        let heuristic = heuristic.create(&self.goal);
        let expansion = PuzzleExpansion::new(self.goal.dim());
        SearchProblem::new(
            self.start,
            Goal::state(self.goal),
            Box::new(expansion),
            heuristic,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::search_engines::{AStar, SearchEngine, SearchOptions};
    use crate::test_utils::*;

    fn is_solvable(start: PuzzleState, goal: &PuzzleState) -> bool {
        PuzzleProblem::new(start, goal.clone())
            .unwrap()
            .is_solvable()
    }

    #[test]
    fn parse_validates_arrangement() {
        assert_eq!(
            PuzzleState::parse::<&str>(0, &[], DEFAULT_BLANK),
            Err(ProblemError::ZeroDimension)
        );
        assert_eq!(
            PuzzleState::parse(2, &["1", "2", "_"], DEFAULT_BLANK),
            Err(ProblemError::TileCountMismatch {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            PuzzleState::parse(2, &["1", "2", "3", "4"], DEFAULT_BLANK),
            Err(ProblemError::BlankCount(0))
        );
        assert_eq!(
            PuzzleState::parse(2, &["_", "2", "3", "_"], DEFAULT_BLANK),
            Err(ProblemError::BlankCount(2))
        );
        let state = PuzzleState::parse(2, &["A", "0", "B", "C"], "0").unwrap();
        assert_eq!(state.blank_index(), 1);
    }

    #[test]
    fn oversized_dimension_is_rejected() {
        let dim = usize::MAX / 2;
        assert_eq!(
            PuzzleState::parse(dim, &["_"], DEFAULT_BLANK),
            Err(ProblemError::DimensionTooLarge(dim))
        );
    }

    #[test]
    fn key_is_separated() {
        let a = PuzzleState::parse(2, &["1", "12", "_", "2"], DEFAULT_BLANK).unwrap();
        let b = PuzzleState::parse(2, &["11", "2", "_", "2"], DEFAULT_BLANK).unwrap();
        assert_eq!(a.key().as_str(), "1:1,2:12,#,1:2");
        assert_ne!(a.key(), b.key());

        let joined = PuzzleState::parse(2, &["a,b", "c", "d", "_"], DEFAULT_BLANK).unwrap();
        let split = PuzzleState::parse(2, &["a", "b,c", "d", "_"], DEFAULT_BLANK).unwrap();
        assert_ne!(joined.key(), split.key());
    }

    #[test]
    fn piece_named_like_default_blank() {
        let start = PuzzleState::parse(2, &["_", "0", "a", "b"], "0").unwrap();
        let goal = PuzzleState::parse(2, &["0", "_", "a", "b"], "0").unwrap();
        assert_ne!(start.key(), goal.key());
        assert_eq!(start.symbols(), vec!["_", "0", "a", "b"]);
        assert_eq!(start.to_string(), "_\t0\na\tb\n");

        let problem = PuzzleProblem::new(start, goal).unwrap();
        let solution = AStar::new(
            problem.into_search_problem(PuzzleHeuristicName::Manhattan),
            &SearchOptions::default(),
        )
        .run()
        .unwrap();
        assert_eq!(solution.num_moves(), 1);
        assert_eq!(solution.path()[1].symbols(), vec!["0", "_", "a", "b"]);
    }

    #[test]
    fn moves_do_not_wrap_rows() {
        // Blank at the end of the first row: no move to the right.
        let state = eight_puzzle(&["1", "2", "_", "3", "4", "5", "6", "7", "8"]);
        assert_eq!(
            state.available_moves(),
            vec![Direction::Left, Direction::Down]
        );
        assert!(matches!(
            state.apply(Direction::Right),
            Err(SearchFailure::InvalidExpansion(_))
        ));
    }

    #[test]
    fn expansion_swaps_blank() {
        let start = eight_puzzle(&["1", "2", "3", "4", "_", "5", "6", "7", "8"]);
        let successors = PuzzleExpansion::new(3).expand(&start).unwrap();

        assert_eq!(successors.len(), 4);
        assert!(successors.iter().all(|next| next.cost.into_inner() == 1.));
        assert_eq!(
            successors[0].state.symbols(),
            vec!["1", "2", "3", "_", "4", "5", "6", "7", "8"]
        );
        assert_eq!(
            successors[3].state.symbols(),
            vec!["1", "2", "3", "4", "7", "5", "6", "_", "8"]
        );
    }

    #[test]
    fn expansion_rejects_other_dimensions() {
        let state = eight_puzzle(&["1", "2", "3", "4", "_", "5", "6", "7", "8"]);
        assert!(matches!(
            PuzzleExpansion::new(4).expand(&state),
            Err(SearchFailure::InvalidExpansion(_))
        ));
    }

    #[test]
    fn translate_moves_reports_tiles() {
        let start = eight_puzzle(&["1", "2", "3", "4", "5", "6", "7", "_", "8"]);
        let middle = start.apply(Direction::Right).unwrap();
        let path = vec![start.clone(), middle.clone(), middle.clone()];

        let moves = translate_moves(&path);
        assert_eq!(
            moves,
            vec![Move {
                tile: Tile::Piece("8".to_string()),
                from: (2, 2),
                to: (2, 1),
                direction: Direction::Left,
            }]
        );
        assert!(translate_moves(&[start]).is_empty());
    }

    #[test]
    fn problem_requires_matching_tiles() {
        let start = eight_puzzle(&["1", "2", "3", "4", "_", "5", "6", "7", "8"]);
        let goal = eight_puzzle(&["1", "2", "3", "4", "_", "5", "6", "7", "9"]);
        assert_eq!(
            PuzzleProblem::new(start.clone(), goal).unwrap_err(),
            ProblemError::TileSetMismatch
        );
        let small = PuzzleState::parse(2, &["1", "2", "3", "_"], DEFAULT_BLANK).unwrap();
        assert!(PuzzleProblem::new(start, small).is_err());
    }

    #[test]
    fn solvability_parity() {
        let goal = eight_puzzle(&EIGHT_PUZZLE_GOAL);
        let start = eight_puzzle(&EIGHT_PUZZLE_HARD_START);
        assert!(is_solvable(start, &goal));

        let swapped = eight_puzzle(&["2", "1", "3", "4", "5", "6", "7", "8", "_"]);
        assert!(!is_solvable(swapped, &goal));

        let scrambled = scramble(&goal, &[Direction::Up, Direction::Left, Direction::Up]);
        assert!(is_solvable(scrambled, &goal));
    }

    #[test]
    fn display_renders_rows() {
        let state = eight_puzzle(&EIGHT_PUZZLE_GOAL);
        assert_eq!(state.to_string(), "1\t2\t3\n4\t5\t6\n7\t8\t_\n");
    }
}
