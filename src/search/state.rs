//! States and the rules that expand them. The engine knows nothing about
//! grids or tiles; it only needs a canonical key for every state and an
//! [`ExpansionRule`] that lists successors with their edge costs.

use crate::search::SearchFailure;
use ordered_float::OrderedFloat;
use std::fmt::{self, Debug, Display};

/// Accumulated or per-edge path cost.
pub type Cost = OrderedFloat<f64>;

/// Canonical identifier of a domain state. Two states with the same key are
/// the same search state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(String);

impl StateKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait SearchState: Clone + Debug {
    /// The canonical key of the state. Must be total and injective over the
    /// states reachable in one search.
    fn key(&self) -> StateKey;
}

/// A state reachable in one transition, together with the cost of the edge
/// leading to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Successor<S> {
    pub state: S,
    pub cost: Cost,
}

impl<S> Successor<S> {
    pub fn new(state: S, cost: impl Into<Cost>) -> Self {
        Self {
            state,
            cost: cost.into(),
        }
    }
}

/// Produces the successors of a state. Implementations must be pure
/// functions of the state and their own immutable configuration, so that
/// repeated searches over the same problem expand states in the same order.
pub trait ExpansionRule<S: SearchState>: Debug {
    fn expand(&self, state: &S) -> Result<Vec<Successor<S>>, SearchFailure>;
}
