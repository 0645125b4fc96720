//! Best-first graph search for implicitly defined graphs.
//!
//! The graph is never materialised: a [`SearchProblem`] hands out the
//! outgoing edges of one state at a time, and the [`AStar`] engine discovers
//! the rest lazily while it drains its frontier.
//!
//! - **A\*** search with an optional hard cost limit ([`AStar::search`])
//! - **Uniform-cost search** whenever the heuristic is zero (the trait default)
//! - **Path reconstruction** by walking parent links ([`AStar::reconstruct_path`])
//! - A fixed-weight 2-D grid problem ([`GridProblem`])
//!
//! # Tie-breaking
//!
//! Frontier entries are ordered by `f`; entries with equal `f` pop in the
//! order they were pushed. Runs are therefore reproducible regardless of
//! hash-map iteration order.

mod astar;
mod distance;
mod grid;
mod node;
mod traits;

pub use astar::{AStar, SearchFailure, SearchStats, SearchStatus};
pub use distance::{chebyshev, manhattan};
pub use grid::{DEMO_GRID, GridError, GridProblem};
pub use node::{NodeId, SearchNode};
pub use pixpath_core::{GridPos, Point, Range};
pub use traits::{GoalFn, HeuristicFn, SearchProblem};
