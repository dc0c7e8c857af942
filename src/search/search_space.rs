use crate::search::{NodeId, SearchNode, SearchState, StateKey, NO_NODE};
use segvec::{Linear, SegVec};
use std::collections::HashMap;

/// A [`SearchSpace`] is the arena that owns every node and state discovered
/// during one search. Each canonical state key maps to exactly one node;
/// parents are referenced by [`NodeId`], so dropping the space releases the
/// whole search tree at once.
#[derive(Debug)]
pub struct SearchSpace<S: SearchState> {
    root_node_id: NodeId,
    nodes: SegVec<SearchNode, Linear>,
    states: SegVec<S, Linear>,
    registered_nodes: HashMap<StateKey, NodeId>,
}

impl<S: SearchState> SearchSpace<S> {
    pub fn new(initial_state: S) -> Self {
        let mut space = Self {
            root_node_id: NO_NODE,
            nodes: SegVec::new(),
            states: SegVec::new(),
            registered_nodes: HashMap::new(),
        };
        let key = initial_state.key();
        space.root_node_id = space.push(key, initial_state, NO_NODE);
        space
    }

    fn push(&mut self, key: StateKey, state: S, parent_id: NodeId) -> NodeId {
        let node_id = NodeId::new(self.nodes.len());
        self.nodes.push(SearchNode::new_with_parent(node_id, parent_id));
        self.states.push(state);
        self.registered_nodes.insert(key, node_id);
        node_id
    }

    /// Get the node registered under the state's key, creating a new one with
    /// the given parent if the state has not been seen before.
    pub fn insert_or_get_node(&mut self, state: S, parent_id: NodeId) -> &mut SearchNode {
        let key = state.key();
        let node_id = match self.registered_nodes.get(&key) {
            Some(&node_id) => node_id,
            None => self.push(key, state, parent_id),
        };
        self.get_node_mut(node_id)
    }

    /// Walk parent links from `goal_id` back to the root and return the
    /// states in start-to-goal order.
    pub fn extract_path(&self, goal_id: NodeId) -> Vec<S> {
        let mut path = vec![];
        let mut current_id = goal_id;
        while current_id != NO_NODE {
            path.push(self.get_state(current_id).clone());
            current_id = self.get_node(current_id).get_parent_id();
        }
        path.reverse();
        path
    }

    #[inline(always)]
    pub fn get_root_node(&self) -> &SearchNode {
        self.get_node(self.root_node_id)
    }

    #[inline(always)]
    pub fn get_root_node_mut(&mut self) -> &mut SearchNode {
        self.get_node_mut(self.root_node_id)
    }

    #[inline(always)]
    pub fn get_node(&self, node_id: NodeId) -> &SearchNode {
        self.nodes.get(node_id.index()).expect("Invalid node id")
    }

    #[inline(always)]
    pub fn get_node_mut(&mut self, node_id: NodeId) -> &mut SearchNode {
        self.nodes
            .get_mut(node_id.index())
            .expect("Invalid node id")
    }

    #[inline(always)]
    pub fn get_state(&self, node_id: NodeId) -> &S {
        self.states.get(node_id.index()).expect("Invalid node id")
    }

    pub fn lookup(&self, key: &StateKey) -> Option<NodeId> {
        self.registered_nodes.get(key).copied()
    }

    /// Number of distinct states discovered so far.
    pub fn len(&self) -> usize {
        self.registered_nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered_nodes.is_empty()
    }
}
