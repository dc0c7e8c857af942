use crate::search::{
    domains::{PuzzleState, Tile},
    Heuristic, HeuristicValue,
};
use std::collections::HashMap;

/// Sum over all non-blank tiles of the Manhattan distance between the tile's
/// position and its position in the goal arrangement. Admissible and
/// consistent for unit-cost slides. When a piece symbol appears more than
/// once, each copy is measured against its nearest goal position.
#[derive(Clone, Debug)]
pub struct ManhattanDistanceSum {
    goal_positions: HashMap<Tile, Vec<(usize, usize)>>,
}

impl ManhattanDistanceSum {
    pub fn new(goal: &PuzzleState) -> Self {
        let mut goal_positions: HashMap<Tile, Vec<(usize, usize)>> = HashMap::new();
        for (index, tile) in goal.tiles().iter().enumerate() {
            if !tile.is_blank() {
                goal_positions
                    .entry(tile.clone())
                    .or_default()
                    .push(goal.position(index));
            }
        }
        Self { goal_positions }
    }
}

impl Heuristic<PuzzleState> for ManhattanDistanceSum {
    fn evaluate(&mut self, state: &PuzzleState) -> HeuristicValue {
        let total: usize = state
            .tiles()
            .iter()
            .enumerate()
            .filter(|(_, tile)| !tile.is_blank())
            .filter_map(|(index, tile)| {
                let (row, col) = state.position(index);
                self.goal_positions.get(tile).and_then(|positions| {
                    positions
                        .iter()
                        .map(|&(goal_row, goal_col)| {
                            row.abs_diff(goal_row) + col.abs_diff(goal_col)
                        })
                        .min()
                })
            })
            .sum();
        (total as f64).into()
    }

    fn is_admissible(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn hard_start_distance() {
        let goal = eight_puzzle(&EIGHT_PUZZLE_GOAL);
        let mut heuristic = ManhattanDistanceSum::new(&goal);

        assert_approx_eq!(heuristic.evaluate(&goal).into_inner(), 0.);
        let start = eight_puzzle(&EIGHT_PUZZLE_HARD_START);
        assert_approx_eq!(heuristic.evaluate(&start).into_inner(), 14.);
    }

    #[test]
    fn blank_is_not_counted() {
        let goal = eight_puzzle(&EIGHT_PUZZLE_GOAL);
        let mut heuristic = ManhattanDistanceSum::new(&goal);
        // One slide away from the goal: only tile 8 is displaced.
        let start = eight_puzzle(&["1", "2", "3", "4", "5", "6", "7", "_", "8"]);
        assert_approx_eq!(heuristic.evaluate(&start).into_inner(), 1.);
    }

    #[test]
    fn duplicate_pieces_use_nearest_goal() {
        let goal = eight_puzzle(&["A", "A", "B", "B", "_", "B", "C", "C", "C"]);
        let mut heuristic = ManhattanDistanceSum::new(&goal);
        let start = eight_puzzle(&["A", "B", "A", "B", "_", "B", "C", "C", "C"]);
        assert_approx_eq!(heuristic.evaluate(&start).into_inner(), 2.);
    }
}
