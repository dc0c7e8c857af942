use crate::search::{domains::Cell, Heuristic, HeuristicValue};

/// Manhattan distance to a fixed target cell. Admissible as long as no cell
/// costs less than 1 to enter; boards with cheaper cells should scale it down
/// with [`GridManhattan::with_min_cost`].
#[derive(Clone, Debug)]
pub struct GridManhattan {
    target: Cell,
    min_cost: f64,
}

impl GridManhattan {
    pub fn new(target: Cell) -> Self {
        Self {
            target,
            min_cost: 1.,
        }
    }

    pub fn with_min_cost(mut self, min_cost: f64) -> Self {
        self.min_cost = min_cost.max(0.);
        self
    }
}

impl Heuristic<Cell> for GridManhattan {
    fn evaluate(&mut self, cell: &Cell) -> HeuristicValue {
        let steps = cell.row.abs_diff(self.target.row) + cell.col.abs_diff(self.target.col);
        (steps as f64 * self.min_cost).into()
    }

    fn is_admissible(&self) -> bool {
        true
    }
}
