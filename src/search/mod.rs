mod direction;
pub mod domains;
mod error;
mod frontier;
mod goal;
pub mod heuristics;
pub mod search_engines;
mod search_node;
mod search_space;
mod search_statistics;
mod solution;
mod state;
mod validate;
mod verbosity;

pub use direction::Direction;
pub use domains::SearchProblem;
pub use error::{ProblemError, SearchFailure};
pub use frontier::{Frontier, FrontierInsertion};
pub use goal::Goal;
pub use heuristics::{Heuristic, HeuristicValue};
pub use search_node::{NodeId, SearchNode, SearchNodeStatus, NO_NODE};
pub use search_space::SearchSpace;
pub use search_statistics::SearchStatistics;
pub use solution::{Solution, TerminalNode};
pub use state::{Cost, ExpansionRule, SearchState, StateKey, Successor};
pub use validate::validate;
pub use verbosity::Verbosity;
