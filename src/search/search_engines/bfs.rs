//! Breadth first search

use crate::search::{
    search_engines::{
        SearchEngine, SearchOptions, SearchPhase, SearchResult, StepReport, StepResult,
        TerminationCondition,
    },
    Cost, ExpansionRule, Goal, HeuristicValue, NodeId, SearchFailure, SearchNodeStatus,
    SearchProblem, SearchSpace, SearchState, SearchStatistics, Solution, TerminalNode, NO_NODE,
};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Uninformed search in order of path length. The heuristic of the problem
/// is ignored and goals are detected when they are generated, so the returned
/// path has the fewest transitions, which is also the cheapest path whenever
/// every edge costs the same.
#[derive(Debug)]
pub struct BreadthFirstSearch<S: SearchState> {
    goal: Goal<S>,
    expansion: Box<dyn ExpansionRule<S>>,
    search_space: SearchSpace<S>,
    queue: VecDeque<NodeId>,
    termination: TerminationCondition,
    statistics: SearchStatistics,
    iterations: usize,
    phase: SearchPhase,
    outcome: Option<SearchResult<S>>,
}

impl<S: SearchState> BreadthFirstSearch<S> {
    pub fn new(problem: SearchProblem<S>, options: &SearchOptions) -> Self {
        let (start, goal, expansion, _heuristic) = problem.into_parts();
        let mut search_space = SearchSpace::new(start);
        let root_node = search_space.get_root_node_mut();
        root_node.open(NO_NODE, Cost::from(0.), HeuristicValue::from(0.), 0);
        let queue = VecDeque::from([root_node.get_node_id()]);

        Self {
            goal,
            expansion,
            search_space,
            queue,
            termination: TerminationCondition::new(options.iteration_limit, options.depth_limit),
            statistics: SearchStatistics::new(),
            iterations: 0,
            phase: SearchPhase::Ready,
            outcome: None,
        }
    }

    /// Expand one node, returning the id of a generated goal node if any.
    fn expand(&mut self, node_id: NodeId) -> Result<Option<NodeId>, SearchFailure> {
        let node = self.search_space.get_node_mut(node_id);
        node.close();
        let (g_value, depth) = (node.get_g(), node.get_depth());
        self.iterations += 1;
        self.statistics.increment_expanded_nodes();

        let successors = self.expansion.expand(self.search_space.get_state(node_id))?;
        self.statistics.increment_generated_successors(successors.len());

        for successor in successors {
            if !successor.cost.0.is_finite() || successor.cost.0 < 0. {
                return Err(SearchFailure::InvalidExpansion(format!(
                    "transition to {:?} has cost {}",
                    successor.state, successor.cost
                )));
            }
            if self.termination.exceeds_depth(depth + 1) {
                self.statistics.increment_depth_pruned_nodes();
                continue;
            }

            let is_goal = self.goal.is_satisfied(&successor.state);
            let child_node = self.search_space.insert_or_get_node(successor.state, node_id);
            if child_node.get_status() != SearchNodeStatus::New {
                self.statistics.increment_dominated_nodes();
                continue;
            }
            let child_g = g_value + successor.cost;
            child_node.open(node_id, child_g, HeuristicValue::from(0.), depth + 1);
            let child_id = child_node.get_node_id();
            self.statistics.increment_generated_nodes(1);
            if is_goal {
                return Ok(Some(child_id));
            }
            self.queue.push_back(child_id);
        }

        self.statistics.register_frontier_size(self.queue.len());
        self.termination.log_if_needed(self.iterations);
        Ok(None)
    }

    fn solution(&self, goal_id: NodeId) -> Solution<S> {
        let goal_node = self.search_space.get_node(goal_id);
        Solution::new(
            self.search_space.extract_path(goal_id),
            TerminalNode {
                cost_so_far: goal_node.get_g(),
                depth: goal_node.get_depth(),
            },
            self.iterations,
        )
    }

    fn finish(&mut self, result: SearchResult<S>) -> StepResult<S> {
        self.phase = SearchPhase::of(&result);
        if let Err(failure) = &result {
            info!(iterations = self.iterations, "search failed: {}", failure);
        }
        self.statistics.finalise_search();
        self.termination.finalise(self.iterations);
        self.outcome = Some(result.clone());
        StepResult::Finished(result)
    }
}

impl<S: SearchState> SearchEngine<S> for BreadthFirstSearch<S> {
    fn step(&mut self) -> StepResult<S> {
        if let Some(result) = &self.outcome {
            return StepResult::Finished(result.clone());
        }
        if self.phase == SearchPhase::Ready {
            self.phase = SearchPhase::Running;
            let root_id = self.search_space.get_root_node().get_node_id();
            if self.goal.is_satisfied(self.search_space.get_state(root_id)) {
                let solution = self.solution(root_id);
                return self.finish(Ok(solution));
            }
        }

        let Some(node_id) = self.queue.pop_front() else {
            return self.finish(Err(SearchFailure::Exhausted {
                iterations: self.iterations,
            }));
        };
        if let Some(failure) = self.termination.should_terminate(self.iterations) {
            return self.finish(Err(failure));
        }

        match self.expand(node_id) {
            Ok(Some(goal_id)) => {
                let solution = self.solution(goal_id);
                self.finish(Ok(solution))
            }
            Ok(None) => {
                let node = self.search_space.get_node(node_id);
                debug!(node = node_id.index(), depth = node.get_depth(), "expanded");
                StepResult::Expanded(StepReport {
                    node_id,
                    cost_so_far: node.get_g(),
                    heuristic_value: node.get_h(),
                    depth: node.get_depth(),
                    iterations: self.iterations,
                    frontier_size: self.queue.len(),
                })
            }
            Err(failure) => self.finish(Err(failure)),
        }
    }

    fn phase(&self) -> SearchPhase {
        self.phase
    }

    fn iterations(&self) -> usize {
        self.iterations
    }

    fn state(&self, node_id: NodeId) -> &S {
        self.search_space.get_state(node_id)
    }

    fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}
