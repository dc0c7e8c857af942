//! A* search with a closed list that can be reopened.
//!
//! Nodes are ordered by `f = g + h` with ties broken first-in first-out.
//! With an admissible and consistent heuristic the returned path is
//! cost-optimal. With an inconsistent heuristic a cheaper path to an already
//! expanded state reopens it, so the final path is still optimal for
//! admissible heuristics, at the price of re-expansions. With an inadmissible
//! heuristic the engine still returns a valid goal-reaching path, but not
//! necessarily the cheapest one.
//!
//! [`SearchOptions::goal_on_generation`] makes the engine stop as soon as a
//! goal state is generated instead of when it is popped. That usually saves
//! expansions but the returned path is no longer guaranteed to be optimal.

use crate::search::{
    search_engines::{
        SearchEngine, SearchOptions, SearchPhase, SearchResult, StepReport, StepResult,
        TerminationCondition,
    },
    Cost, ExpansionRule, Frontier, FrontierInsertion, Goal, Heuristic, NodeId, SearchFailure,
    SearchNodeStatus, SearchProblem, SearchSpace, SearchState, SearchStatistics, Solution,
    TerminalNode, NO_NODE,
};
use tracing::{debug, info, trace, warn};

#[derive(Debug)]
pub struct AStar<S: SearchState> {
    goal: Goal<S>,
    expansion: Box<dyn ExpansionRule<S>>,
    heuristic: Box<dyn Heuristic<S>>,
    search_space: SearchSpace<S>,
    frontier: Frontier,
    termination: TerminationCondition,
    statistics: SearchStatistics,
    goal_on_generation: bool,
    generated_goal: Option<NodeId>,
    iterations: usize,
    phase: SearchPhase,
    outcome: Option<SearchResult<S>>,
}

impl<S: SearchState> AStar<S> {
    /// Set up the search: the start node is opened with cost 0 and put in
    /// the frontier, nothing is expanded yet.
    pub fn new(problem: SearchProblem<S>, options: &SearchOptions) -> Self {
        let (start, goal, expansion, mut heuristic) = problem.into_parts();
        let mut statistics = SearchStatistics::new();
        let termination = TerminationCondition::new(options.iteration_limit, options.depth_limit);
        if !heuristic.is_admissible() {
            warn!("heuristic is not admissible, the path found may not be the cheapest");
        }
        if options.goal_on_generation {
            info!("testing goals on generation, the path found may not be the cheapest");
        }

        let h_value = heuristic.evaluate(&start);
        statistics.increment_evaluated_nodes();
        statistics.register_heuristic_value(h_value);
        info!(initial_heuristic_value = h_value.into_inner());

        let mut search_space = SearchSpace::new(start);
        let root_node = search_space.get_root_node_mut();
        root_node.open(NO_NODE, Cost::from(0.), h_value, 0);
        let root_id = root_node.get_node_id();

        let mut frontier = Frontier::new();
        frontier.insert(root_id, Cost::from(0.), root_node.get_f());

        Self {
            goal,
            expansion,
            heuristic,
            search_space,
            frontier,
            termination,
            statistics,
            goal_on_generation: options.goal_on_generation,
            generated_goal: None,
            iterations: 0,
            phase: SearchPhase::Ready,
            outcome: None,
        }
    }

    /// Close the node, expand it and relax all of its successors.
    fn expand(&mut self, node_id: NodeId) -> Result<StepReport, SearchFailure> {
        let node = self.search_space.get_node_mut(node_id);
        node.close();
        let (g_value, h_value, depth) = (node.get_g(), node.get_h(), node.get_depth());
        self.iterations += 1;
        self.statistics.increment_expanded_nodes();
        self.statistics.register_heuristic_value(h_value);

        let state = self.search_space.get_state(node_id);
        let successors = self.expansion.expand(state)?;
        self.statistics.increment_generated_successors(successors.len());
        if let Some(successor) = successors
            .iter()
            .find(|successor| !successor.cost.0.is_finite() || successor.cost.0 < 0.)
        {
            return Err(SearchFailure::InvalidExpansion(format!(
                "transition from {:?} to {:?} has cost {}",
                state, successor.state, successor.cost
            )));
        }

        for successor in successors {
            let child_depth = depth + 1;
            if self.termination.exceeds_depth(child_depth) {
                self.statistics.increment_depth_pruned_nodes();
                continue;
            }
            let child_g = g_value + successor.cost;
            self.relax(node_id, successor.state, child_g, child_depth);
            if self.generated_goal.is_some() {
                break;
            }
        }

        self.statistics.register_frontier_size(self.frontier.len());
        self.termination.log_if_needed(self.iterations);
        debug!(
            node = node_id.index(),
            g = g_value.into_inner(),
            h = h_value.into_inner(),
            depth,
            frontier = self.frontier.len(),
            "expanded"
        );

        Ok(StepReport {
            node_id,
            cost_so_far: g_value,
            heuristic_value: h_value,
            depth,
            iterations: self.iterations,
            frontier_size: self.frontier.len(),
        })
    }

    /// Offer a path of cost `g_value` to `state`. The path is kept only if it
    /// is strictly cheaper than every path known for the state, whether that
    /// path sits in the frontier or has already been expanded.
    fn relax(&mut self, parent_id: NodeId, state: S, g_value: Cost, depth: usize) {
        let existing = self.search_space.lookup(&state.key());
        let Some(child_id) = existing else {
            let h_value = self.heuristic.evaluate(&state);
            self.statistics.increment_evaluated_nodes();
            self.statistics.increment_generated_nodes(1);
            let child_node = self.search_space.insert_or_get_node(state, parent_id);
            child_node.open(parent_id, g_value, h_value, depth);
            let child_id = child_node.get_node_id();
            let f_value = child_node.get_f();
            self.frontier.insert(child_id, g_value, f_value);
            self.check_generated_goal(child_id);
            return;
        };

        let child_node = self.search_space.get_node(child_id);
        let (status, known_g, h_value) = (
            child_node.get_status(),
            child_node.get_g(),
            child_node.get_h(),
        );
        if known_g <= g_value {
            trace!(node = child_id.index(), ?status, "dominated by known path");
            self.statistics.increment_dominated_nodes();
            return;
        }
        let insertion = self.frontier.insert(child_id, g_value, g_value + h_value);
        if insertion == FrontierInsertion::Dominated {
            self.statistics.increment_dominated_nodes();
            return;
        }
        if status == SearchNodeStatus::Closed {
            trace!(node = child_id.index(), "reopened");
            self.statistics.increment_reopened_nodes();
        }
        self.search_space
            .get_node_mut(child_id)
            .open(parent_id, g_value, h_value, depth);
        self.check_generated_goal(child_id);
    }

    /// Remember the first goal node reached, when goals are tested on
    /// generation.
    fn check_generated_goal(&mut self, node_id: NodeId) {
        if self.goal_on_generation
            && self.generated_goal.is_none()
            && self.goal.is_satisfied(self.search_space.get_state(node_id))
        {
            self.generated_goal = Some(node_id);
        }
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
        match &result {
            Ok(solution) => info!(
                iterations = self.iterations,
                cost = solution.cost().into_inner(),
                moves = solution.num_moves(),
                "goal found"
            ),
            Err(failure) => info!(iterations = self.iterations, "search failed: {}", failure),
        }
        self.statistics.register_frontier_size(self.frontier.high_water());
        self.statistics.finalise_search();
        self.termination.finalise(self.iterations);
        self.outcome = Some(result.clone());
        StepResult::Finished(result)
    }
}

impl<S: SearchState> SearchEngine<S> for AStar<S> {
    fn step(&mut self) -> StepResult<S> {
        if let Some(result) = &self.outcome {
            return StepResult::Finished(result.clone());
        }
        self.phase = SearchPhase::Running;

        let result = loop {
            let Some(node_id) = self.frontier.extract_min() else {
                break Err(SearchFailure::Exhausted {
                    iterations: self.iterations,
                });
            };

            let node = self.search_space.get_node(node_id);
            if node
                .get_closed_g()
                .is_some_and(|closed_g| closed_g <= node.get_g())
            {
                // Already expanded at least as cheaply.
                continue;
            }

            if self.goal.is_satisfied(self.search_space.get_state(node_id)) {
                break Ok(self.solution(node_id));
            }

            if let Some(failure) = self.termination.should_terminate(self.iterations) {
                break Err(failure);
            }

            match self.expand(node_id) {
                Ok(report) => match self.generated_goal {
                    Some(goal_id) => break Ok(self.solution(goal_id)),
                    None => return StepResult::Expanded(report),
                },
                Err(failure) => break Err(failure),
            }
        };

        self.finish(result)
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
