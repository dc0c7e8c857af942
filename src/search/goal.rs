use crate::search::{SearchState, StateKey};
use std::fmt::{self, Debug};

/// The goal of a search: either one specific state, compared by canonical
/// key, or an arbitrary predicate over states.
pub enum Goal<S: SearchState> {
    State { state: S, key: StateKey },
    Predicate(Box<dyn Fn(&S) -> bool>),
}

impl<S: SearchState> Goal<S> {
    pub fn state(state: S) -> Self {
        let key = state.key();
        Goal::State { state, key }
    }

    pub fn predicate(test: impl Fn(&S) -> bool + 'static) -> Self {
        Goal::Predicate(Box::new(test))
    }

    /// Returns true if the goal is satisfied by the given state.
    pub fn is_satisfied(&self, state: &S) -> bool {
        match self {
            Goal::State { key, .. } => state.key() == *key,
            Goal::Predicate(test) => test(state),
        }
    }

    /// The goal state, if the goal is a single state.
    pub fn goal_state(&self) -> Option<&S> {
        match self {
            Goal::State { state, .. } => Some(state),
            Goal::Predicate(_) => None,
        }
    }
}

impl<S: SearchState> Debug for Goal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::State { state, .. } => f.debug_tuple("Goal::State").field(state).finish(),
            Goal::Predicate(_) => f.write_str("Goal::Predicate(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::Vertex;

    #[test]
    fn state_goal_compares_keys() {
        let goal = Goal::state(Vertex(3));
        assert!(goal.is_satisfied(&Vertex(3)));
        assert!(!goal.is_satisfied(&Vertex(4)));
        assert_eq!(goal.goal_state(), Some(&Vertex(3)));
    }

    #[test]
    fn predicate_goal() {
        let goal = Goal::predicate(|vertex: &Vertex| vertex.0 % 2 == 0);
        assert!(goal.is_satisfied(&Vertex(8)));
        assert!(!goal.is_satisfied(&Vertex(5)));
        assert!(goal.goal_state().is_none());
        assert_eq!(format!("{:?}", goal), "Goal::Predicate(..)");
    }
}
