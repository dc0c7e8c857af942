use crate::search::{Cost, HeuristicValue};
use ordered_float::Float;

/// Index of a node in the [`crate::search::SearchSpace`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Parent id of the root node.
pub const NO_NODE: NodeId = NodeId(usize::MAX);

/// The status of a search node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchNodeStatus {
    /// New node, not yet opened
    New,
    /// Node is in the open list
    Open,
    /// Node has been expanded, i.e. it is in the closed list
    Closed,
}

/// A [`SearchNode`] is a node in the search space. It contains information
/// about the state specific to the search, such as its costs and parent node.
/// The state itself lives in the search space under the same [`NodeId`].
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Unique identifier of the node, one per canonical state key
    node_id: NodeId,
    /// Status of the node
    status: SearchNodeStatus,
    /// F-value of the node, the score the frontier orders by.
    f: HeuristicValue,
    /// G-value of the node, i.e. the cost of the best known path to it.
    g: Cost,
    /// H-value of the node, i.e. the heuristic estimate of the cost to reach
    /// the goal.
    h: HeuristicValue,
    /// Number of transitions on the best known path from the root
    depth: usize,
    /// Parent node on the best known path. The parent is referred to by id
    /// only, the arena owns every node.
    parent_id: NodeId,
    /// Cost of the best known path at the time the node was last closed
    closed_g: Option<Cost>,
}

impl SearchNode {
    /// Create a new search node with no parent. This should only be used for
    /// the root node of the search space. For non-root nodes see
    /// [`SearchNode::new_with_parent`].
    pub fn new_without_parent(node_id: NodeId) -> Self {
        Self::new_with_parent(node_id, NO_NODE)
    }

    pub fn new_with_parent(node_id: NodeId, parent_id: NodeId) -> Self {
        Self {
            node_id,
            status: SearchNodeStatus::New,
            f: HeuristicValue::infinity(),
            g: Cost::infinity(),
            h: HeuristicValue::infinity(),
            depth: 0,
            parent_id,
            closed_g: None,
        }
    }

    /// Open the node with a (possibly better) path. Reopening a closed node
    /// keeps the cost it was closed with so that stale pops can be told apart
    /// from genuine improvements.
    pub fn open(&mut self, parent_id: NodeId, g: Cost, h: HeuristicValue, depth: usize) {
        self.status = SearchNodeStatus::Open;
        self.parent_id = parent_id;
        self.g = g;
        self.h = h;
        self.f = g + h;
        self.depth = depth;
    }

    pub fn close(&mut self) {
        debug_assert_eq!(
            self.status,
            SearchNodeStatus::Open,
            "Node must be open to close it"
        );
        self.status = SearchNodeStatus::Closed;
        self.closed_g = Some(self.g);
    }

    pub fn get_status(&self) -> SearchNodeStatus {
        self.status
    }

    pub fn get_node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn get_f(&self) -> HeuristicValue {
        self.f
    }

    pub fn get_g(&self) -> Cost {
        self.g
    }

    pub fn get_h(&self) -> HeuristicValue {
        self.h
    }

    pub fn get_depth(&self) -> usize {
        self.depth
    }

    pub fn get_parent_id(&self) -> NodeId {
        self.parent_id
    }

    /// The cost this node had when it was last expanded, if it ever was.
    pub fn get_closed_g(&self) -> Option<Cost> {
        self.closed_g
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_sets_scores() {
        let mut node = SearchNode::new_without_parent(NodeId::new(0));
        assert_eq!(node.get_status(), SearchNodeStatus::New);
        assert_eq!(node.get_parent_id(), NO_NODE);

        node.open(NO_NODE, Cost::from(2.), HeuristicValue::from(3.), 1);
        assert_eq!(node.get_status(), SearchNodeStatus::Open);
        assert_eq!(node.get_f(), HeuristicValue::from(5.));
        assert_eq!(node.get_depth(), 1);
        assert_eq!(node.get_closed_g(), None);
    }

    #[test]
    fn reopening_keeps_closed_cost() {
        let mut node = SearchNode::new_with_parent(NodeId::new(3), NodeId::new(1));
        node.open(NodeId::new(1), Cost::from(4.), HeuristicValue::from(0.), 2);
        node.close();
        node.open(NodeId::new(2), Cost::from(2.), HeuristicValue::from(0.), 2);

        assert_eq!(node.get_status(), SearchNodeStatus::Open);
        assert_eq!(node.get_parent_id(), NodeId::new(2));
        assert_eq!(node.get_closed_g(), Some(Cost::from(4.)));
    }
}
