use crate::search::HeuristicValue;
use ordered_float::Float;
use std::time::Instant;
use tracing::info;

#[derive(Debug)]
pub struct SearchStatistics {
    /// Number of nodes expanded
    expanded_nodes: i64,
    /// Number of nodes evaluated by the heuristic
    evaluated_nodes: i64,
    /// Number of unique nodes generated
    generated_nodes: i64,
    /// Number of closed nodes reopened through a cheaper path
    reopened_nodes: i64,
    /// Number of successors discarded by a dominance check
    dominated_nodes: i64,
    /// Number of successors discarded by the depth limit
    depth_pruned_nodes: i64,
    /// Number of successors produced by the expansion rule
    generated_successors: i64,
    /// Largest frontier size seen
    frontier_high_water: usize,
    /// Best heuristic value found so far
    best_heuristic_value: HeuristicValue,
    /// Time when the search started
    search_start_time: Instant,
    /// Time when the last log was printed, used for periodic logging
    last_log_time: Instant,
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStatistics {
    pub fn new() -> Self {
        info!("starting search");
        Self {
            expanded_nodes: 0,
            evaluated_nodes: 0,
            generated_nodes: 0,
            reopened_nodes: 0,
            dominated_nodes: 0,
            depth_pruned_nodes: 0,
            generated_successors: 0,
            frontier_high_water: 0,
            best_heuristic_value: HeuristicValue::infinity(),
            search_start_time: Instant::now(),
            last_log_time: Instant::now(),
        }
    }

    pub fn register_heuristic_value(&mut self, heuristic_value: HeuristicValue) {
        if heuristic_value < self.best_heuristic_value {
            self.best_heuristic_value = heuristic_value;
            info!(best_heuristic_value = self.best_heuristic_value.into_inner());
        }
    }

    pub fn register_frontier_size(&mut self, size: usize) {
        self.frontier_high_water = self.frontier_high_water.max(size);
    }

    pub fn increment_expanded_nodes(&mut self) {
        self.expanded_nodes += 1;
        self.log_if_needed();
    }

    pub fn increment_evaluated_nodes(&mut self) {
        self.evaluated_nodes += 1;
        self.log_if_needed();
    }

    pub fn increment_generated_nodes(&mut self, num_nodes: usize) {
        self.generated_nodes += num_nodes as i64;
        self.log_if_needed();
    }

    pub fn increment_reopened_nodes(&mut self) {
        self.reopened_nodes += 1;
        self.log_if_needed();
    }

    pub fn increment_dominated_nodes(&mut self) {
        self.dominated_nodes += 1;
    }

    pub fn increment_depth_pruned_nodes(&mut self) {
        self.depth_pruned_nodes += 1;
    }

    pub fn increment_generated_successors(&mut self, num_successors: usize) {
        self.generated_successors += num_successors as i64;
        self.log_if_needed();
    }

    pub fn expanded_nodes(&self) -> i64 {
        self.expanded_nodes
    }

    pub fn generated_nodes(&self) -> i64 {
        self.generated_nodes
    }

    pub fn reopened_nodes(&self) -> i64 {
        self.reopened_nodes
    }

    pub fn dominated_nodes(&self) -> i64 {
        self.dominated_nodes
    }

    pub fn frontier_high_water(&self) -> usize {
        self.frontier_high_water
    }

    fn log_if_needed(&mut self) {
        if self.last_log_time.elapsed().as_secs() > 10 {
            self.last_log_time = Instant::now();
            self.log();
        }
    }

    fn log(&self) {
        info!(
            expanded_nodes = self.expanded_nodes,
            evaluated_nodes = self.evaluated_nodes,
            generated_nodes = self.generated_nodes,
            reopened_nodes = self.reopened_nodes,
            dominated_nodes = self.dominated_nodes,
            depth_pruned_nodes = self.depth_pruned_nodes,
            generated_successors = self.generated_successors,
            frontier_high_water = self.frontier_high_water,
            best_heuristic_value = self.best_heuristic_value.into_inner(),
        );
    }

    pub fn finalise_search(&self) {
        info!("finalising search");
        self.log();
        info!(search_duration = self.search_start_time.elapsed().as_secs_f64());
    }
}
