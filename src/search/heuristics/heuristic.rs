use crate::search::{
    domains::{Cell, GridBoard, PuzzleState},
    heuristics::{GridManhattan, ManhattanDistanceSum, SquaredEuclideanToTarget, ZeroHeuristic},
};
use ordered_float::OrderedFloat;
use serde::Deserialize;
use std::fmt::Debug;

pub type HeuristicValue = OrderedFloat<f64>;

pub trait Heuristic<S>: Debug {
    /// Estimate the cost of reaching the goal from the given state. The goal
    /// is fixed when the heuristic is created. Values must be non-negative.
    fn evaluate(&mut self, state: &S) -> HeuristicValue;

    /// Whether the estimate never exceeds the true remaining cost. Only
    /// admissible heuristics make A* return cost-optimal paths.
    fn is_admissible(&self) -> bool {
        false
    }
}

#[derive(clap::ValueEnum, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum GridHeuristicName {
    #[default]
    #[clap(help = "Squared Euclidean distance to the target cell. Not admissible.")]
    SquaredEuclidean,
    #[clap(help = "Manhattan distance to the target cell, scaled by the cheapest cell cost.")]
    Manhattan,
    #[clap(help = "The zero heuristic, i.e. uniform-cost search.")]
    Zero,
}

impl GridHeuristicName {
    pub fn create(&self, board: &GridBoard, target: Cell) -> Box<dyn Heuristic<Cell>> {
        match self {
            GridHeuristicName::SquaredEuclidean => Box::new(SquaredEuclideanToTarget::new(target)),
            GridHeuristicName::Manhattan => Box::new(
                GridManhattan::new(target).with_min_cost(board.min_cost().into_inner()),
            ),
            GridHeuristicName::Zero => Box::new(ZeroHeuristic::new()),
        }
    }
}

#[derive(clap::ValueEnum, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PuzzleHeuristicName {
    #[default]
    #[clap(help = "Sum of tile Manhattan distances to their goal positions.")]
    Manhattan,
    #[clap(help = "The zero heuristic, i.e. uniform-cost search.")]
    Zero,
}

impl PuzzleHeuristicName {
    pub fn create(&self, goal: &PuzzleState) -> Box<dyn Heuristic<PuzzleState>> {
        match self {
            PuzzleHeuristicName::Manhattan => Box::new(ManhattanDistanceSum::new(goal)),
            PuzzleHeuristicName::Zero => Box::new(ZeroHeuristic::new()),
        }
    }
}
