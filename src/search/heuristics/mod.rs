mod grid_manhattan;
mod heuristic;
mod manhattan_sum;
mod squared_euclidean;
mod zero_heuristic;

pub use grid_manhattan::GridManhattan;
pub use heuristic::{GridHeuristicName, Heuristic, HeuristicValue, PuzzleHeuristicName};
pub use manhattan_sum::ManhattanDistanceSum;
pub use squared_euclidean::SquaredEuclideanToTarget;
pub use zero_heuristic::ZeroHeuristic;
