use crate::search::{Cost, ExpansionRule, Goal, SearchState};

/// Check that `path` starts at `start`, that every step is a transition of
/// the expansion rule and that the last state satisfies the goal. Returns the
/// total edge cost of the path.
pub fn validate<S: SearchState>(
    path: &[S],
    start: &S,
    goal: &Goal<S>,
    expansion: &dyn ExpansionRule<S>,
) -> Result<Cost, String> {
    let first = path.first().ok_or("Path is empty")?;
    if first.key() != start.key() {
        return Err(format!("Path starts at {:?} instead of {:?}", first, start));
    }

    let mut cost = Cost::from(0.);
    for (step, window) in path.windows(2).enumerate() {
        let (from, to) = (&window[0], &window[1]);
        let to_key = to.key();
        let successors = expansion
            .expand(from)
            .map_err(|e| format!("Expanding step {} failed: {}", step, e))?;
        match successors.iter().find(|next| next.state.key() == to_key) {
            Some(next) => cost += next.cost,
            None => {
                return Err(format!(
                    "Step {} from {:?} to {:?} is not a valid transition",
                    step, from, to
                ))
            }
        }
    }

    let last = &path[path.len() - 1];
    if !goal.is_satisfied(last) {
        return Err(format!("Path does not reach the goal, final state is: {:?}", last));
    }

    Ok(cost)
}
