use crate::search::SearchFailure;
use std::time::{Duration, Instant};
use tracing::info;

/// Budget bookkeeping for one search: the iteration limit and the depth
/// limit, where 0 means unbounded for both.
#[derive(Debug)]
pub struct TerminationCondition {
    iteration_limit: usize,
    depth_limit: usize,
    start_time: Instant,
    last_log_time: Instant,
}

impl TerminationCondition {
    pub fn new(iteration_limit: usize, depth_limit: usize) -> Self {
        info!(
            iteration_limit = (iteration_limit > 0).then_some(iteration_limit),
            depth_limit = (depth_limit > 0).then_some(depth_limit),
        );
        Self {
            iteration_limit,
            depth_limit,
            start_time: Instant::now(),
            last_log_time: Instant::now(),
        }
    }

    /// Checked before every expansion, so at most `iteration_limit`
    /// expansions are ever performed.
    pub fn should_terminate(&self, iterations: usize) -> Option<SearchFailure> {
        if self.iteration_limit > 0 && iterations >= self.iteration_limit {
            info!(iterations, "iteration limit reached");
            return Some(SearchFailure::IterationLimitReached {
                limit: self.iteration_limit,
            });
        }
        None
    }

    /// Whether a node at this depth must be discarded.
    pub fn exceeds_depth(&self, depth: usize) -> bool {
        self.depth_limit > 0 && depth > self.depth_limit
    }

    pub fn log_if_needed(&mut self, iterations: usize) {
        if self.last_log_time.elapsed() > Duration::from_secs(10) {
            self.last_log_time = Instant::now();
            self.log(iterations);
        }
    }

    fn log(&self, iterations: usize) {
        info!(
            iterations,
            time_elapsed = self.start_time.elapsed().as_secs_f64(),
        );
    }

    pub fn finalise(&self, iterations: usize) {
        info!(
            total_iterations = iterations,
            total_time_used = self.start_time.elapsed().as_secs_f64(),
        );
    }
}
