//! The result of a successful search: the path from the start state to a
//! goal state and how much it cost to find and to follow.

use crate::search::{Cost, SearchState};

/// What was known about the goal node when the search stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalNode {
    pub cost_so_far: Cost,
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Solution<S: SearchState> {
    path: Vec<S>,
    terminal: TerminalNode,
    iterations: usize,
}

impl<S: SearchState> Solution<S> {
    pub fn new(path: Vec<S>, terminal: TerminalNode, iterations: usize) -> Self {
        debug_assert!(!path.is_empty(), "a solution path contains the start");
        Self {
            path,
            terminal,
            iterations,
        }
    }

    /// States from the start to the goal, both included.
    pub fn path(&self) -> &[S] {
        &self.path
    }

    pub fn into_path(self) -> Vec<S> {
        self.path
    }

    pub fn terminal(&self) -> &TerminalNode {
        &self.terminal
    }

    pub fn goal_state(&self) -> Option<&S> {
        self.path.last()
    }

    /// Total edge cost of the path.
    pub fn cost(&self) -> Cost {
        self.terminal.cost_so_far
    }

    /// Number of transitions on the path.
    pub fn num_moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Number of expansions the search performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

