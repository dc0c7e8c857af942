mod astar;
mod bfs;
mod search_engine;
mod termination_condition;

pub use astar::AStar;
pub use bfs::BreadthFirstSearch;
pub use search_engine::{
    SearchEngine, SearchEngineName, SearchOptions, SearchPhase, SearchResult, StepReport,
    StepResult, SteppingMode, DEFAULT_ITERATION_LIMIT,
};
pub use termination_condition::TerminationCondition;
