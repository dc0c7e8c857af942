//! The open list of best-first search.
//!
//! Entries are keyed by [`NodeId`], which the search space hands out once per
//! canonical state key, so frontier membership is membership by state. The
//! underlying [`PriorityQueue`] keeps a key → heap position map, which makes
//! [`Frontier::decrease_priority`] a logarithmic operation.

use crate::search::{Cost, HeuristicValue, NodeId};
use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierPriority {
    score: HeuristicValue,
    /// Insertion order, so that equal scores pop first-in first-out.
    sequence: u64,
    cost_so_far: Cost,
}

/// What happened to an entry offered to the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierInsertion {
    /// The node was not in the frontier and has been added.
    Inserted,
    /// The node was in the frontier with a worse cost and has been replaced.
    Replaced,
    /// The node is already in the frontier with an equal or better cost.
    Dominated,
}

#[derive(Debug)]
pub struct Frontier {
    queue: PriorityQueue<NodeId, Reverse<FrontierPriority>>,
    next_sequence: u64,
    high_water: usize,
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            queue: PriorityQueue::new(),
            next_sequence: 0,
            high_water: 0,
        }
    }

    fn priority(&mut self, score: HeuristicValue, cost_so_far: Cost) -> Reverse<FrontierPriority> {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        Reverse(FrontierPriority {
            score,
            sequence,
            cost_so_far,
        })
    }

    /// Offer a node to the frontier, applying the dominance check: an
    /// existing entry with `cost_so_far` no greater than the new one wins,
    /// otherwise the new entry replaces it.
    pub fn insert(
        &mut self,
        node_id: NodeId,
        cost_so_far: Cost,
        score: HeuristicValue,
    ) -> FrontierInsertion {
        match self.cost_of(node_id) {
            Some(existing) if existing <= cost_so_far => {
                trace!(node = node_id.index(), "dominated by frontier entry");
                FrontierInsertion::Dominated
            }
            Some(_) => {
                self.decrease_priority(node_id, cost_so_far, score);
                FrontierInsertion::Replaced
            }
            None => {
                let priority = self.priority(score, cost_so_far);
                self.queue.push(node_id, priority);
                self.high_water = self.high_water.max(self.queue.len());
                FrontierInsertion::Inserted
            }
        }
    }

    /// Replace the entry of a node already in the frontier and restore the
    /// heap order. Returns false if the node is not in the frontier. The
    /// replaced entry counts as newly inserted for tie-breaking.
    pub fn decrease_priority(
        &mut self,
        node_id: NodeId,
        cost_so_far: Cost,
        score: HeuristicValue,
    ) -> bool {
        if !self.queue.contains(&node_id) {
            return false;
        }
        let priority = self.priority(score, cost_so_far);
        self.queue.change_priority(&node_id, priority);
        true
    }

    /// Remove and return the node with the lowest score.
    pub fn extract_min(&mut self) -> Option<NodeId> {
        self.queue.pop().map(|(node_id, _)| node_id)
    }

    pub fn contains(&self, node_id: NodeId) -> bool {
        self.queue.contains(&node_id)
    }

    /// The cost-so-far the node was queued with, if it is in the frontier.
    pub fn cost_of(&self, node_id: NodeId) -> Option<Cost> {
        self.queue
            .get_priority(&node_id)
            .map(|Reverse(priority)| priority.cost_so_far)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Largest number of entries the frontier has held at once.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: usize) -> NodeId {
        NodeId::new(index)
    }

    fn value(x: f64) -> Cost {
        Cost::from(x)
    }

    #[test]
    fn extracts_lowest_score_first() {
        let mut frontier = Frontier::new();
        frontier.insert(id(0), value(0.), value(7.));
        frontier.insert(id(1), value(0.), value(3.));
        frontier.insert(id(2), value(0.), value(5.));

        assert_eq!(frontier.extract_min(), Some(id(1)));
        assert_eq!(frontier.extract_min(), Some(id(2)));
        assert_eq!(frontier.extract_min(), Some(id(0)));
        assert_eq!(frontier.extract_min(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn ties_break_by_insertion_order() {
        let mut frontier = Frontier::new();
        for index in [4, 2, 9, 1] {
            frontier.insert(id(index), value(1.), value(2.));
        }

        let order: Vec<NodeId> = std::iter::from_fn(|| frontier.extract_min()).collect();
        assert_eq!(order, vec![id(4), id(2), id(9), id(1)]);
    }

    #[test]
    fn worse_duplicate_is_discarded() {
        let mut frontier = Frontier::new();
        assert_eq!(
            frontier.insert(id(0), value(2.), value(4.)),
            FrontierInsertion::Inserted
        );
        assert_eq!(
            frontier.insert(id(0), value(3.), value(5.)),
            FrontierInsertion::Dominated
        );
        assert_eq!(
            frontier.insert(id(0), value(2.), value(4.)),
            FrontierInsertion::Dominated
        );
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.cost_of(id(0)), Some(value(2.)));
    }

    #[test]
    fn better_duplicate_replaces_entry() {
        let mut frontier = Frontier::new();
        frontier.insert(id(0), value(5.), value(9.));
        frontier.insert(id(1), value(1.), value(6.));

        assert_eq!(
            frontier.insert(id(0), value(1.), value(5.)),
            FrontierInsertion::Replaced
        );
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.cost_of(id(0)), Some(value(1.)));
        assert_eq!(frontier.extract_min(), Some(id(0)));
        assert_eq!(frontier.high_water(), 2);
    }

    #[test]
    fn decrease_priority_requires_membership() {
        let mut frontier = Frontier::new();
        assert!(!frontier.decrease_priority(id(3), value(0.), value(0.)));
        frontier.insert(id(3), value(4.), value(4.));
        assert!(frontier.contains(id(3)));
        assert!(frontier.decrease_priority(id(3), value(1.), value(1.)));
        assert_eq!(frontier.cost_of(id(3)), Some(value(1.)));
    }
}
