use crate::search::{ExpansionRule, Goal, Heuristic, SearchState};

/// Everything a search engine needs to run: where to start, when to stop,
/// how to expand states and how to estimate the remaining cost.
#[derive(Debug)]
pub struct SearchProblem<S: SearchState> {
    start: S,
    goal: Goal<S>,
    expansion: Box<dyn ExpansionRule<S>>,
    heuristic: Box<dyn Heuristic<S>>,
}

impl<S: SearchState> SearchProblem<S> {
    pub fn new(
        start: S,
        goal: Goal<S>,
        expansion: Box<dyn ExpansionRule<S>>,
        heuristic: Box<dyn Heuristic<S>>,
    ) -> Self {
        Self {
            start,
            goal,
            expansion,
            heuristic,
        }
    }

    pub fn start(&self) -> &S {
        &self.start
    }

    pub fn goal(&self) -> &Goal<S> {
        &self.goal
    }

    pub fn expansion(&self) -> &dyn ExpansionRule<S> {
        self.expansion.as_ref()
    }

    /// Split the problem into its parts, for engines that own them.
    pub fn into_parts(self) -> (S, Goal<S>, Box<dyn ExpansionRule<S>>, Box<dyn Heuristic<S>>) {
        (self.start, self.goal, self.expansion, self.heuristic)
    }
}
