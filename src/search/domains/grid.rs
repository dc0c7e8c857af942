//! Routing a single car across a parking lot. The lot is a rectangular grid
//! of cells; other cars are obstacles and every cell has a traversal cost
//! that is paid when a car drives onto it.

use crate::search::{
    heuristics::GridHeuristicName, Cost, Direction, ExpansionRule, Goal, ProblemError,
    SearchFailure, SearchProblem, SearchState, StateKey, Successor,
};
use itertools::Itertools;
use serde::Serialize;
use std::fmt::{self, Display};
use std::rc::Rc;

/// Order in which neighbours are generated. Ties in the frontier are broken
/// by insertion order, so this order is observable in the returned paths.
pub const GRID_EXPANSION_ORDER: [Direction; 4] = [
    Direction::Down,
    Direction::Left,
    Direction::Right,
    Direction::Up,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl SearchState for Cell {
    fn key(&self) -> StateKey {
        StateKey::new(format!("{}x{}", self.row, self.col))
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// What occupies a cell of the lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    /// The car being routed.
    RoutedCar,
    /// Any other car. Never passable.
    OtherCar,
}

impl CellKind {
    pub fn from_symbol(symbol: char) -> Result<Self, ProblemError> {
        match symbol {
            '.' | ' ' => Ok(CellKind::Empty),
            'T' => Ok(CellKind::RoutedCar),
            'X' => Ok(CellKind::OtherCar),
            _ => Err(ProblemError::UnknownCellSymbol(symbol)),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::RoutedCar => 'T',
            CellKind::OtherCar => 'X',
        }
    }
}

/// An immutable snapshot of the lot: what occupies each cell and what it
/// costs to drive onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct GridBoard {
    rows: usize,
    cols: usize,
    kinds: Vec<CellKind>,
    costs: Vec<Cost>,
}

impl GridBoard {
    /// An empty board where every cell costs 1.
    pub fn empty(rows: usize, cols: usize) -> Result<Self, ProblemError> {
        if rows == 0 || cols == 0 {
            return Err(ProblemError::EmptyBoard);
        }
        Ok(Self {
            rows,
            cols,
            kinds: vec![CellKind::Empty; rows * cols],
            costs: vec![Cost::from(1.); rows * cols],
        })
    }

    /// Parse a board from one string per row, see [`CellKind::from_symbol`]
    /// for the symbols. Costs default to 1 when not given.
    pub fn parse<R: AsRef<str>>(
        rows: &[R],
        costs: Option<&[Vec<f64>]>,
    ) -> Result<Self, ProblemError> {
        let cols = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut board = Self::empty(rows.len(), cols)?;

        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.as_ref().chars().collect();
            if symbols.len() != cols {
                return Err(ProblemError::RaggedBoard {
                    row,
                    expected: cols,
                    found: symbols.len(),
                });
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                board = board.with_kind(Cell::new(row, col), CellKind::from_symbol(symbol)?)?;
            }
        }

        if let Some(costs) = costs {
            if costs.len() != board.rows || costs.iter().any(|line| line.len() != cols) {
                return Err(ProblemError::CostShapeMismatch {
                    rows: board.rows,
                    cols,
                });
            }
            for (row, line) in costs.iter().enumerate() {
                for (col, &cost) in line.iter().enumerate() {
                    board = board.with_cost(Cell::new(row, col), cost)?;
                }
            }
        }

        Ok(board)
    }

    pub fn with_kind(mut self, cell: Cell, kind: CellKind) -> Result<Self, ProblemError> {
        let index = self.index(cell)?;
        self.kinds[index] = kind;
        Ok(self)
    }

    /// Set the cost of driving onto a cell. Negative and non-finite costs are
    /// rejected here, so the search never sees them.
    pub fn with_cost(mut self, cell: Cell, cost: impl Into<Cost>) -> Result<Self, ProblemError> {
        let index = self.index(cell)?;
        self.costs[index] = ProblemError::check_cost(cell.row, cell.col, cost.into())?;
        Ok(self)
    }

    fn index(&self, cell: Cell) -> Result<usize, ProblemError> {
        if self.contains(cell) {
            Ok(cell.row * self.cols + cell.col)
        } else {
            Err(ProblemError::OutOfBounds {
                row: cell.row,
                col: cell.col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Kind of an on-board cell.
    pub fn kind(&self, cell: Cell) -> Option<CellKind> {
        self.index(cell).ok().map(|index| self.kinds[index])
    }

    /// Cost of driving onto an on-board cell.
    pub fn cost(&self, cell: Cell) -> Option<Cost> {
        self.index(cell).ok().map(|index| self.costs[index])
    }

    /// The cheapest cost of entering any cell.
    pub fn min_cost(&self) -> Cost {
        self.costs.iter().copied().min().unwrap_or(Cost::from(0.))
    }

    pub fn is_passable(&self, cell: Cell) -> bool {
        matches!(
            self.kind(cell),
            Some(CellKind::Empty) | Some(CellKind::RoutedCar)
        )
    }

    /// The cell holding the routed car, if the board has one.
    pub fn routed_car(&self) -> Option<Cell> {
        self.kinds
            .iter()
            .position(|&kind| kind == CellKind::RoutedCar)
            .map(|index| Cell::new(index / self.cols, index % self.cols))
    }
}

impl Display for GridBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.kinds.chunks(self.cols) {
            writeln!(f, "{}", row.iter().map(CellKind::symbol).join(" "))?;
        }
        Ok(())
    }
}

/// Four-neighbour moves on a [`GridBoard`], see [`GRID_EXPANSION_ORDER`].
/// The edge cost is the cost of the destination cell.
#[derive(Debug, Clone)]
pub struct GridExpansion {
    board: Rc<GridBoard>,
}

impl GridExpansion {
    pub fn new(board: Rc<GridBoard>) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &GridBoard {
        &self.board
    }
}

impl ExpansionRule<Cell> for GridExpansion {
    fn expand(&self, cell: &Cell) -> Result<Vec<Successor<Cell>>, SearchFailure> {
        if !self.board.contains(*cell) {
            return Err(SearchFailure::InvalidExpansion(format!(
                "cell {} is not on the {}x{} board",
                cell,
                self.board.rows(),
                self.board.cols()
            )));
        }

        let successors = GRID_EXPANSION_ORDER
            .iter()
            .filter_map(|direction| {
                direction.step(cell.position(), self.board.rows(), self.board.cols())
            })
            .map(Cell::from)
            .filter(|&next| self.board.is_passable(next))
            .filter_map(|next| {
                self.board
                    .cost(next)
                    .map(|cost| Successor::new(next, cost))
            })
            .collect();
        Ok(successors)
    }
}

/// A routing instance: a board, where the routed car starts and the cell it
/// must reach.
#[derive(Debug, Clone)]
pub struct GridProblem {
    board: Rc<GridBoard>,
    start: Cell,
    target: Cell,
}

impl GridProblem {
    /// Build a routing problem. Without an explicit start the car marked on
    /// the board is routed. Neither endpoint may be off the board or occupied
    /// by another car.
    pub fn new(board: GridBoard, start: Option<Cell>, target: Cell) -> Result<Self, ProblemError> {
        let start = start
            .or_else(|| board.routed_car())
            .ok_or(ProblemError::MissingStart)?;
        for cell in [start, target] {
            match board.kind(cell) {
                None => {
                    return Err(ProblemError::OutOfBounds {
                        row: cell.row,
                        col: cell.col,
                        rows: board.rows(),
                        cols: board.cols(),
                    })
                }
                Some(CellKind::OtherCar) => {
                    return Err(ProblemError::OccupiedCell {
                        row: cell.row,
                        col: cell.col,
                    })
                }
                Some(_) => {}
            }
        }
        Ok(Self {
            board: Rc::new(board),
            start,
            target,
        })
    }

    pub fn board(&self) -> &GridBoard {
        &self.board
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn target(&self) -> Cell {
        self.target
    }

    pub fn expansion(&self) -> GridExpansion {
        GridExpansion::new(self.board.clone())
    }

    pub fn goal(&self) -> Goal<Cell> {
        Goal::state(self.target)
    }

    pub fn into_search_problem(self, heuristic: GridHeuristicName) -> SearchProblem<Cell> {
        SearchProblem::new(
            self.start,
            self.goal(),
            Box::new(self.expansion()),
            heuristic.create(&self.board, self.target),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn successors(board: &GridBoard, cell: Cell) -> Vec<(Cell, f64)> {
        GridExpansion::new(Rc::new(board.clone()))
            .expand(&cell)
            .unwrap()
            .into_iter()
            .map(|successor| (successor.state, successor.cost.into_inner()))
            .collect()
    }

    #[test]
    fn key_format() {
        assert_eq!(Cell::new(3, 0).key().as_str(), "3x0");
        assert_eq!(Cell::new(12, 1).key().as_str(), "12x1");
        assert_ne!(Cell::new(1, 21).key(), Cell::new(12, 1).key());
    }

    #[test]
    fn neighbours_in_fixed_order() {
        let board = GridBoard::empty(3, 3).unwrap();
        assert_eq!(
            successors(&board, Cell::new(1, 1)),
            vec![
                (Cell::new(2, 1), 1.),
                (Cell::new(1, 0), 1.),
                (Cell::new(1, 2), 1.),
                (Cell::new(0, 1), 1.),
            ]
        );
    }

    #[test]
    fn neighbours_respect_bounds_and_obstacles() {
        let board = GridBoard::parse(&["T.X", "X..", "..."], None).unwrap();
        // Right neighbour (0, 1) is open, down (1, 0) holds another car.
        assert_eq!(
            successors(&board, Cell::new(0, 0)),
            vec![(Cell::new(0, 1), 1.)]
        );
        assert_eq!(
            successors(&board, Cell::new(2, 2)),
            vec![(Cell::new(2, 1), 1.), (Cell::new(1, 2), 1.)]
        );
    }

    #[test]
    fn edge_cost_is_destination_cost() {
        let board = GridBoard::empty(1, 3)
            .unwrap()
            .with_cost(Cell::new(0, 0), 5.)
            .unwrap()
            .with_cost(Cell::new(0, 2), 2.)
            .unwrap();
        assert_eq!(
            successors(&board, Cell::new(0, 1)),
            vec![(Cell::new(0, 0), 5.), (Cell::new(0, 2), 2.)]
        );
    }

    #[test]
    fn parse_reads_symbols_and_costs() {
        let costs = parking_lot_costs();
        let board = GridBoard::parse(&PARKING_LOT_BOARD, Some(costs.as_slice())).unwrap();
        assert_eq!(board.rows(), 4);
        assert_eq!(board.cols(), 4);
        assert_eq!(board.routed_car(), Some(Cell::new(0, 3)));
        assert_eq!(board.kind(Cell::new(1, 3)), Some(CellKind::OtherCar));
        assert_eq!(board.cost(Cell::new(0, 2)), Some(Cost::from(2.)));
        assert_eq!(board.cost(Cell::new(4, 0)), None);
        assert_eq!(board.to_string().lines().next(), Some(". . . T"));
    }

    #[test]
    fn parse_rejects_bad_boards() {
        assert_eq!(
            GridBoard::parse::<&str>(&[], None),
            Err(ProblemError::EmptyBoard)
        );
        assert_eq!(
            GridBoard::parse(&["...", ".."], None),
            Err(ProblemError::RaggedBoard {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            GridBoard::parse(&["..?"], None),
            Err(ProblemError::UnknownCellSymbol('?'))
        );
    }

    #[test]
    fn parse_rejects_misshapen_costs() {
        let costs = vec![vec![1., 1.], vec![1.]];
        assert_eq!(
            GridBoard::parse(&["..", ".."], Some(costs.as_slice())),
            Err(ProblemError::CostShapeMismatch { rows: 2, cols: 2 })
        );
    }

    #[test]
    fn invalid_costs_rejected_at_construction() {
        let board = GridBoard::empty(2, 2).unwrap();
        assert!(matches!(
            board.clone().with_cost(Cell::new(1, 1), -1.),
            Err(ProblemError::InvalidCost { row: 1, col: 1, .. })
        ));
        assert!(board.clone().with_cost(Cell::new(0, 1), f64::NAN).is_err());
        assert!(board.with_cost(Cell::new(0, 1), f64::INFINITY).is_err());
    }

    #[test]
    fn problem_defaults_start_to_routed_car() {
        let board = GridBoard::parse(&PARKING_LOT_BOARD, None).unwrap();
        let problem = GridProblem::new(board, None, Cell::new(3, 0)).unwrap();
        assert_eq!(problem.start(), Cell::new(0, 3));
        assert!(problem.goal().is_satisfied(&Cell::new(3, 0)));
    }

    #[test]
    fn problem_rejects_bad_endpoints() {
        let board = GridBoard::parse(&PARKING_LOT_BOARD, None).unwrap();
        assert_eq!(
            GridProblem::new(board.clone(), None, Cell::new(1, 3)).unwrap_err(),
            ProblemError::OccupiedCell { row: 1, col: 3 }
        );
        assert!(matches!(
            GridProblem::new(board, Some(Cell::new(0, 9)), Cell::new(3, 0)),
            Err(ProblemError::OutOfBounds { .. })
        ));
        let empty = GridBoard::empty(2, 2).unwrap();
        assert_eq!(
            GridProblem::new(empty, None, Cell::new(1, 1)).unwrap_err(),
            ProblemError::MissingStart
        );
    }
}
