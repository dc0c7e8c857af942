use crate::search::{
    domains::{PuzzleState, DEFAULT_BLANK},
    Direction, ExpansionRule, Heuristic, HeuristicValue, SearchFailure, SearchState, StateKey,
    Successor,
};
use std::collections::HashMap;

/// A vertex of an explicit graph, for testing the engine without a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vertex(pub u32);

impl SearchState for Vertex {
    fn key(&self) -> StateKey {
        StateKey::new(format!("v{}", self.0))
    }
}

/// Directed weighted edges, expanded in the order they were given.
#[derive(Debug)]
pub struct WeightedGraph {
    edges: Vec<(u32, u32, f64)>,
}

impl WeightedGraph {
    pub fn new(edges: &[(u32, u32, f64)]) -> Self {
        Self {
            edges: edges.to_vec(),
        }
    }
}

impl ExpansionRule<Vertex> for WeightedGraph {
    fn expand(&self, state: &Vertex) -> Result<Vec<Successor<Vertex>>, SearchFailure> {
        Ok(self
            .edges
            .iter()
            .filter(|(from, _, _)| *from == state.0)
            .map(|&(_, to, cost)| Successor::new(Vertex(to), cost))
            .collect())
    }
}

/// Heuristic values looked up per vertex, 0 for vertices not in the table.
#[derive(Debug)]
pub struct TableHeuristic {
    values: HashMap<u32, f64>,
}

impl TableHeuristic {
    pub fn new(values: &[(u32, f64)]) -> Self {
        Self {
            values: values.iter().copied().collect(),
        }
    }
}

impl Heuristic<Vertex> for TableHeuristic {
    fn evaluate(&mut self, state: &Vertex) -> HeuristicValue {
        HeuristicValue::from(self.values.get(&state.0).copied().unwrap_or(0.))
    }
}

/// Parking lot with the routed car in the top right corner and another car
/// right below it.
pub const PARKING_LOT_BOARD: [&str; 4] = ["...T", "...X", "....", "...."];

pub fn parking_lot_costs() -> Vec<Vec<f64>> {
    vec![
        vec![1., 1., 2., 1.],
        vec![1., 1., 1., 2.],
        vec![1., 1., 1., 1.],
        vec![1., 1., 1., 1.],
    ]
}

pub const EIGHT_PUZZLE_GOAL: [&str; 9] = ["1", "2", "3", "4", "5", "6", "7", "8", "_"];

pub const EIGHT_PUZZLE_HARD_START: [&str; 9] = ["2", "8", "5", "6", "_", "3", "1", "4", "7"];

pub fn eight_puzzle(tiles: &[&str]) -> PuzzleState {
    PuzzleState::parse(3, tiles, DEFAULT_BLANK).unwrap()
}

/// Move the blank of `state` along `moves`.
pub fn scramble(state: &PuzzleState, moves: &[Direction]) -> PuzzleState {
    moves
        .iter()
        .fold(state.clone(), |next, &step| next.apply(step).unwrap())
}

/// Blank walks that are valid from [`EIGHT_PUZZLE_GOAL`].
pub fn scramble_sequences() -> Vec<Vec<Direction>> {
    use Direction::*;
    vec![
        vec![Up],
        vec![Left, Up],
        vec![Up, Left, Down],
        vec![Left, Left, Up, Right, Down],
        vec![Up, Up, Left, Left, Down, Right, Down],
        vec![Up, Left, Up, Left, Down, Down, Right, Up],
    ]
}
