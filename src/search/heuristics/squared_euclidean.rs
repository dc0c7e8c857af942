use crate::search::{domains::Cell, Heuristic, HeuristicValue};

/// Sum of the squared row and column offsets to a fixed target cell.
///
/// This grows quadratically while the true remaining cost grows linearly, so
/// it overestimates and is **not** admissible: A* driven by it reaches the
/// target but may return a path that is not the cheapest one. Use
/// [`super::GridManhattan`] when cost-optimal routes are required.
#[derive(Clone, Debug)]
pub struct SquaredEuclideanToTarget {
    target: Cell,
}

impl SquaredEuclideanToTarget {
    pub fn new(target: Cell) -> Self {
        Self { target }
    }
}

impl Heuristic<Cell> for SquaredEuclideanToTarget {
    fn evaluate(&mut self, cell: &Cell) -> HeuristicValue {
        let rows = cell.row.abs_diff(self.target.row);
        let cols = cell.col.abs_diff(self.target.col);
        ((rows * rows + cols * cols) as f64).into()
    }
}
