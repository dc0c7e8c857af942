use crate::search::{
    search_engines::{AStar, BreadthFirstSearch},
    Cost, HeuristicValue, NodeId, SearchFailure, SearchProblem, SearchState, SearchStatistics,
    Solution,
};
use serde::Deserialize;

pub type SearchResult<S> = Result<Solution<S>, SearchFailure>;

/// Progress report of one expansion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// The node that was expanded
    pub node_id: NodeId,
    pub cost_so_far: Cost,
    pub heuristic_value: HeuristicValue,
    pub depth: usize,
    /// Number of expansions so far, including this one
    pub iterations: usize,
    pub frontier_size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepResult<S: SearchState> {
    /// One node was expanded and the search can continue.
    Expanded(StepReport),
    /// The search has finished. Further steps return the same result.
    Finished(SearchResult<S>),
}

/// Where a search is in its life cycle. The last four phases are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Created, the start node is in the frontier, nothing expanded yet.
    Ready,
    Running,
    GoalFound,
    Exhausted,
    LimitReached,
    /// The expansion rule broke its contract.
    Failed,
}

impl SearchPhase {
    pub fn of<S: SearchState>(result: &SearchResult<S>) -> Self {
        match result {
            Ok(_) => SearchPhase::GoalFound,
            Err(SearchFailure::Exhausted { .. }) => SearchPhase::Exhausted,
            Err(SearchFailure::IterationLimitReached { .. }) => SearchPhase::LimitReached,
            Err(SearchFailure::InvalidExpansion(_)) => SearchPhase::Failed,
        }
    }

    pub fn is_done(&self) -> bool {
        !matches!(self, SearchPhase::Ready | SearchPhase::Running)
    }
}

/// A search engine runs one search over the problem it was created with.
/// Engines are step-wise: [`SearchEngine::step`] performs exactly one
/// expansion, so a caller can interleave its own work (e.g. animating the
/// explored states) between steps and cancel by simply not stepping again.
pub trait SearchEngine<S: SearchState> {
    fn step(&mut self) -> StepResult<S>;

    fn phase(&self) -> SearchPhase;

    /// Number of expansions performed so far.
    fn iterations(&self) -> usize;

    /// The state stored under a node id, e.g. one reported by a step.
    fn state(&self, node_id: NodeId) -> &S;

    fn statistics(&self) -> &SearchStatistics;

    /// Run the search to completion.
    fn run(&mut self) -> SearchResult<S> {
        loop {
            if let StepResult::Finished(result) = self.step() {
                return result;
            }
        }
    }
}

/// Whether the caller wants the engine to loop internally or to hand back
/// control after every expansion.
#[derive(clap::ValueEnum, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SteppingMode {
    #[default]
    Blocking,
    Cooperative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of expansions, 0 for unbounded
    pub iteration_limit: usize,
    /// Maximum path length in transitions, 0 for unbounded
    pub depth_limit: usize,
    pub stepping: SteppingMode,
    /// Test goals when nodes are generated rather than when they are popped.
    /// Stops earlier, but the path found is not guaranteed to be the cheapest.
    pub goal_on_generation: bool,
}

pub const DEFAULT_ITERATION_LIMIT: usize = 10_000;

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            iteration_limit: DEFAULT_ITERATION_LIMIT,
            depth_limit: 0,
            stepping: SteppingMode::Blocking,
            goal_on_generation: false,
        }
    }
}

impl SearchOptions {
    pub fn with_iteration_limit(mut self, iteration_limit: usize) -> Self {
        self.iteration_limit = iteration_limit;
        self
    }

    pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    pub fn with_stepping(mut self, stepping: SteppingMode) -> Self {
        self.stepping = stepping;
        self
    }

    pub fn with_goal_on_generation(mut self, goal_on_generation: bool) -> Self {
        self.goal_on_generation = goal_on_generation;
        self
    }
}

#[derive(clap::ValueEnum, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SearchEngineName {
    #[default]
    #[clap(help = "A* ordered by cost so far plus heuristic estimate.")]
    Astar,
    #[clap(help = "Breadth-first search, ignores the heuristic.")]
    BreadthFirst,
}

impl SearchEngineName {
    pub fn create<S: SearchState + 'static>(
        &self,
        problem: SearchProblem<S>,
        options: &SearchOptions,
    ) -> Box<dyn SearchEngine<S>> {
        match self {
            SearchEngineName::Astar => Box::new(AStar::new(problem, options)),
            SearchEngineName::BreadthFirst => Box::new(BreadthFirstSearch::new(problem, options)),
        }
    }
}
