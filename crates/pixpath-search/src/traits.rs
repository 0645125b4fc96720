use std::fmt::Debug;
use std::hash::Hash;

/// Boxed goal predicate, supplied to a problem at construction time.
pub type GoalFn<S> = Box<dyn Fn(S) -> bool + Send + Sync>;

/// Boxed heuristic, supplied to a problem at construction time.
pub type HeuristicFn<S> = Box<dyn Fn(S) -> f64 + Send + Sync>;

/// A search problem over an implicit graph.
pub trait SearchProblem {
    /// Vertex identity. Used as a key in the reached table.
    type State: Copy + Eq + Hash + Debug;

    /// Append `(successor, edge cost)` pairs of `state` into `buf`. The caller
    /// clears `buf` before calling.
    ///
    /// Costs must be non-negative. Repeated calls for the same state must
    /// produce the same edges in the same order.
    fn successors(&self, state: Self::State, buf: &mut Vec<(Self::State, f64)>);

    /// Whether `state` satisfies the goal condition.
    fn is_goal(&self, state: Self::State) -> bool;

    /// Estimated remaining cost from `state` to a goal. Admissibility is not
    /// checked; the default of zero turns A* into uniform-cost search.
    fn h(&self, state: Self::State) -> f64 {
        let _ = state;
        0.0
    }
}
